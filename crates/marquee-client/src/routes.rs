//! Navigation targets for every screen.
use std::fmt;

/// A location a controller can navigate to.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Route {
    /// `/`
    Home,
    /// `/movies`
    Movies,
    /// `/movies/{id}`
    Movie {
        /// Movie identifier.
        id: i64,
    },
    /// `/genres`
    Genres,
    /// `/genres/{id}`; the name is carried as navigation state only.
    Genre {
        /// Genre identifier.
        id: i64,
        /// Display name passed along from the genre list.
        name: Option<String>,
    },
    /// `/login`
    Login,
    /// `/logout`
    Logout,
    /// `/admin`
    Admin,
    /// `/admin/movie/{id}`; `0` opens an empty form.
    EditMovie {
        /// Movie identifier.
        id: i64,
    },
    /// `/graphql`
    GraphQl,
    /// `/moviesgraphql/{id}`
    GraphQlMovie {
        /// Movie identifier.
        id: i64,
    },
    /// Any unrecognised path.
    NotFound,
}

impl Route {
    /// Path this route renders at.
    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Self::Home => "/".to_string(),
            Self::Movies => "/movies".to_string(),
            Self::Movie { id } => format!("/movies/{id}"),
            Self::Genres => "/genres".to_string(),
            Self::Genre { id, .. } => format!("/genres/{id}"),
            Self::Login => "/login".to_string(),
            Self::Logout => "/logout".to_string(),
            Self::Admin => "/admin".to_string(),
            Self::EditMovie { id } => format!("/admin/movie/{id}"),
            Self::GraphQl => "/graphql".to_string(),
            Self::GraphQlMovie { id } => format!("/moviesgraphql/{id}"),
            Self::NotFound => "/404".to_string(),
        }
    }

    /// Resolve a path; unknown paths and non-numeric ids map to `NotFound`.
    #[must_use]
    pub fn parse(path: &str) -> Self {
        let segments: Vec<&str> = path
            .trim_end_matches('/')
            .split('/')
            .filter(|segment| !segment.is_empty())
            .collect();
        match segments.as_slice() {
            [] => Self::Home,
            ["movies"] => Self::Movies,
            ["movies", raw] => parse_id(raw).map_or(Self::NotFound, |id| Self::Movie { id }),
            ["genres"] => Self::Genres,
            ["genres", raw] => parse_id(raw).map_or(Self::NotFound, |id| Self::Genre { id, name: None }),
            ["login"] => Self::Login,
            ["logout"] => Self::Logout,
            ["admin"] => Self::Admin,
            ["admin", "movie", raw] => {
                parse_id(raw).map_or(Self::NotFound, |id| Self::EditMovie { id })
            }
            ["graphql"] => Self::GraphQl,
            ["moviesgraphql", raw] => {
                parse_id(raw).map_or(Self::NotFound, |id| Self::GraphQlMovie { id })
            }
            _ => Self::NotFound,
        }
    }
}

fn parse_id(raw: &str) -> Option<i64> {
    raw.parse().ok()
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_parse_back_to_their_route() {
        let routes = [
            Route::Home,
            Route::Movies,
            Route::Movie { id: 3 },
            Route::Genres,
            Route::Genre { id: 2, name: None },
            Route::Login,
            Route::Logout,
            Route::Admin,
            Route::EditMovie { id: 0 },
            Route::GraphQl,
            Route::GraphQlMovie { id: 8 },
        ];
        for route in routes {
            assert_eq!(Route::parse(&route.path()), route);
        }
    }

    #[test]
    fn unknown_paths_are_not_found() {
        assert_eq!(Route::parse("/movies/abc"), Route::NotFound);
        assert_eq!(Route::parse("/nowhere"), Route::NotFound);
        assert_eq!(Route::parse("/admin/movie/"), Route::NotFound);
    }

    #[test]
    fn genre_name_is_not_part_of_the_path() {
        let route = Route::Genre {
            id: 4,
            name: Some("Comedy".to_string()),
        };
        assert_eq!(route.to_string(), "/genres/4");
    }
}

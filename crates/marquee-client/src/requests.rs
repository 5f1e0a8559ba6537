//! REST endpoint specs for the catalogue backend.
//!
//! Each function returns a [`FetchSpec`] describing the call, the status
//! that means success, and how to decode the body.

use marquee_api_models::{
    AppStatus, Genre, GenresEnvelope, Movie, MovieEnvelope, MoviePayload, MoviesEnvelope,
    SigninRequest,
};
use serde_json::Value;

use crate::error::FetchError;
use crate::fetch::{FetchSpec, decode_json, decode_nothing};
use crate::transport::ApiRequest;

/// `GET /v1/movies`.
#[must_use]
pub fn list_movies() -> FetchSpec<Vec<Movie>> {
    FetchSpec::new(ApiRequest::get("/v1/movies"), 200, decode_movies)
}

/// `GET /v1/movie/{id}`.
#[must_use]
pub fn get_movie(id: i64) -> FetchSpec<Movie> {
    FetchSpec::new(ApiRequest::get(format!("/v1/movie/{id}")), 200, decode_movie)
}

/// `GET /v1/genres`.
#[must_use]
pub fn list_genres() -> FetchSpec<Vec<Genre>> {
    FetchSpec::new(ApiRequest::get("/v1/genres"), 200, decode_genres)
}

/// `GET /v1/movies/{genre_id}`; a `null` or missing list decodes as empty.
#[must_use]
pub fn movies_by_genre(genre_id: i64) -> FetchSpec<Vec<Movie>> {
    FetchSpec::new(
        ApiRequest::get(format!("/v1/movies/{genre_id}")),
        200,
        decode_movies,
    )
}

/// `POST /v1/signin`, yielding the issued token.
#[must_use]
pub fn sign_in(credentials: &SigninRequest) -> FetchSpec<String> {
    let body = serde_json::json!({
        "email": credentials.email,
        "password": credentials.password,
    });
    FetchSpec::new(ApiRequest::post("/v1/signin", body), 200, decode_token)
}

/// `POST /v1/admin/editmovie` with the bearer token.
#[must_use]
pub fn upsert_movie(token: &str, payload: &MoviePayload) -> FetchSpec<()> {
    let body = serde_json::to_value(payload).unwrap_or(Value::Null);
    FetchSpec::new(
        ApiRequest::post("/v1/admin/editmovie", body).with_bearer(token),
        200,
        decode_nothing,
    )
}

/// `DELETE /v1/admin/deletemovie/{id}` with the bearer token; success is 204.
#[must_use]
pub fn delete_movie(token: &str, id: i64) -> FetchSpec<()> {
    FetchSpec::new(
        ApiRequest::delete(format!("/v1/admin/deletemovie/{id}")).with_bearer(token),
        204,
        decode_nothing,
    )
}

/// `GET /status`.
#[must_use]
pub fn status() -> FetchSpec<AppStatus> {
    FetchSpec::new(ApiRequest::get("/status"), 200, decode_json::<AppStatus>)
}

fn decode_movies(body: &[u8]) -> Result<Vec<Movie>, FetchError> {
    decode_json::<MoviesEnvelope>(body).map(|envelope| envelope.movies)
}

fn decode_movie(body: &[u8]) -> Result<Movie, FetchError> {
    decode_json::<MovieEnvelope>(body).map(|envelope| envelope.movie)
}

fn decode_genres(body: &[u8]) -> Result<Vec<Genre>, FetchError> {
    decode_json::<GenresEnvelope>(body).map(|envelope| envelope.genres)
}

/// Envelope keys checked, in order, before any other string value.
const TOKEN_KEYS: [&str; 3] = ["response", "token", "jwt"];

// Known keys win; otherwise the alphabetically first string value is used,
// since the decoded map does not keep wire order.
fn decode_token(body: &[u8]) -> Result<String, FetchError> {
    let value = decode_json::<Value>(body)?;
    let object = value
        .as_object()
        .ok_or_else(|| FetchError::Decode("sign-in response is not an object".to_string()))?;
    TOKEN_KEYS
        .iter()
        .find_map(|key| object.get(*key).and_then(Value::as_str))
        .or_else(|| object.values().find_map(Value::as_str))
        .map(str::to_string)
        .ok_or_else(|| FetchError::Decode("sign-in response carried no token".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::execute;
    use crate::fetch::testing::RecordingTransport;
    use crate::transport::RawResponse;
    use anyhow::Result;
    use marquee_test_support::fixtures::{genres_envelope, movie_envelope, movies_envelope};
    use reqwest::Method;
    use serde_json::json;

    #[tokio::test]
    async fn movies_by_genre_treats_null_and_missing_lists_as_empty() -> Result<()> {
        let transport = RecordingTransport::replying(vec![
            Ok(RawResponse::json(200, &json!({ "movies": null }))),
            Ok(RawResponse::json(200, &json!({}))),
        ]);
        assert!(execute(&transport, movies_by_genre(3)).await?.is_empty());
        assert!(execute(&transport, movies_by_genre(3)).await?.is_empty());
        assert_eq!(transport.requests()[0].path, "/v1/movies/3");
        Ok(())
    }

    #[tokio::test]
    async fn list_and_item_specs_unwrap_envelopes() -> Result<()> {
        let transport = RecordingTransport::replying(vec![
            Ok(RawResponse::json(200, &movies_envelope(&[(1, "A"), (2, "B")]))),
            Ok(RawResponse::json(200, &movie_envelope(7, "Seven"))),
            Ok(RawResponse::json(200, &genres_envelope(&[(1, "Drama")]))),
        ]);
        assert_eq!(execute(&transport, list_movies()).await?.len(), 2);
        let movie = execute(&transport, get_movie(7)).await?;
        assert_eq!(movie.title, "Seven");
        assert_eq!(movie.genres, vec!["Drama".to_string(), "Sci-Fi".to_string()]);
        let genres = execute(&transport, list_genres()).await?;
        assert_eq!(genres[0].genre_name, "Drama");
        Ok(())
    }

    #[tokio::test]
    async fn sign_in_reads_token_and_posts_credentials() -> Result<()> {
        let transport = RecordingTransport::replying(vec![
            Ok(RawResponse::json(200, &json!({ "token": "abc" }))),
            Ok(RawResponse::json(200, &json!({ "ok": true }))),
        ]);
        let credentials = SigninRequest {
            email: "me@example.com".to_string(),
            password: "secret".to_string(),
        };
        assert_eq!(execute(&transport, sign_in(&credentials)).await?, "abc");
        let missing = execute(&transport, sign_in(&credentials)).await;
        assert!(matches!(missing, Err(FetchError::Decode(_))));

        let sent = &transport.requests()[0];
        assert_eq!(sent.method, Method::POST);
        assert_eq!(
            sent.body,
            Some(json!({ "email": "me@example.com", "password": "secret" }))
        );
        Ok(())
    }

    #[tokio::test]
    async fn sign_in_prefers_response_key_over_other_strings() -> Result<()> {
        let transport = RecordingTransport::replying(vec![
            Ok(RawResponse::json(200, &json!({ "alpha": "nope", "response": "jwt-1" }))),
            Ok(RawResponse::json(200, &json!({ "zeta": "z", "beta": "b" }))),
        ]);
        let credentials = SigninRequest {
            email: "me@example.com".to_string(),
            password: "secret".to_string(),
        };
        assert_eq!(execute(&transport, sign_in(&credentials)).await?, "jwt-1");
        assert_eq!(execute(&transport, sign_in(&credentials)).await?, "b");
        Ok(())
    }

    #[tokio::test]
    async fn sign_in_rejects_non_object_bodies() -> Result<()> {
        let transport =
            RecordingTransport::replying(vec![Ok(RawResponse::json(200, &json!("bare")))]);
        let credentials = SigninRequest {
            email: "me@example.com".to_string(),
            password: "secret".to_string(),
        };
        let result = execute(&transport, sign_in(&credentials)).await;
        assert!(matches!(result, Err(FetchError::Decode(_))));
        Ok(())
    }

    #[tokio::test]
    async fn mutations_carry_bearer_and_expect_their_status() -> Result<()> {
        let transport = RecordingTransport::replying(vec![
            Ok(RawResponse::empty(204)),
            Ok(RawResponse::json(200, &json!({ "ok": true }))),
        ]);
        execute(&transport, delete_movie("tok", 9)).await?;
        let upsert = execute(
            &transport,
            upsert_movie(
                "tok",
                &MoviePayload {
                    id: "0".to_string(),
                    title: "New".to_string(),
                    description: String::new(),
                    release_date: String::new(),
                    runtime: String::new(),
                    rating: String::new(),
                    mpaa_rating: String::new(),
                },
            ),
        )
        .await;
        assert!(upsert.is_ok());

        let sent = transport.requests();
        assert_eq!(sent[0].method, Method::DELETE);
        assert_eq!(sent[0].path, "/v1/admin/deletemovie/9");
        assert_eq!(sent[0].bearer.as_deref(), Some("tok"));
        assert_eq!(sent[1].bearer.as_deref(), Some("tok"));
        assert_eq!(
            sent[1].body.as_ref().and_then(|b| b.get("releaseDate")),
            Some(&json!(""))
        );
        Ok(())
    }

    #[tokio::test]
    async fn delete_with_200_is_not_success() {
        let transport = RecordingTransport::replying(vec![Ok(RawResponse::empty(200))]);
        let outcome = execute(&transport, delete_movie("tok", 1)).await;
        assert!(matches!(outcome, Err(FetchError::Application { status: 200, .. })));
    }
}

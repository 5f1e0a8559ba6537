//! Sign-in and sign-out.

use marquee_client::SubmitOutcome;
use marquee_client::views::login::{Credentials, LoginView, logout};

use crate::cli::LoginArgs;
use crate::client::{AppContext, CliError, CliResult, prompt_password};
use crate::output::format_validation;

pub(crate) async fn handle_login(ctx: &AppContext, args: LoginArgs) -> CliResult<()> {
    let password = match args.password {
        Some(password) => password,
        None => prompt_password()?,
    };
    let mut session = ctx.session();
    let mut view = LoginView::new(Credentials::new(args.email, password));

    match view.submit(&mut session, &ctx.transport).await {
        SubmitOutcome::Navigate(route) => {
            tracing::debug!(%route, "sign-in complete");
            println!("signed in");
            Ok(())
        }
        SubmitOutcome::Blocked(errors) => Err(CliError::validation(format_validation(&errors))),
        SubmitOutcome::Failed(message) => Err(CliError::failure(anyhow::anyhow!(message))),
        SubmitOutcome::Cancelled => Err(CliError::validation("sign-in cancelled")),
    }
}

pub(crate) fn handle_logout(ctx: &AppContext) -> CliResult<()> {
    let mut session = ctx.session();
    let route = logout(&mut session).map_err(CliError::failure)?;
    tracing::debug!(%route, "signed out");
    println!("signed out");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::test_context;
    use httpmock::prelude::*;
    use marquee_test_support::fixtures::error_envelope;
    use serde_json::json;

    fn args(password: &str) -> LoginArgs {
        LoginArgs {
            email: "admin@example.com".to_string(),
            password: Some(password.to_string()),
        }
    }

    #[tokio::test]
    async fn login_persists_session_and_logout_clears_it() {
        let server = MockServer::start_async().await;
        let dir = tempfile::tempdir().expect("tempdir");
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/v1/signin")
                .json_body(json!({ "email": "admin@example.com", "password": "password" }));
            then.status(200).json_body(json!({ "token": "abc" }));
        });
        let ctx = test_context(&server.base_url(), dir.path());

        handle_login(&ctx, args("password"))
            .await
            .expect("login should succeed");
        mock.assert();
        assert_eq!(ctx.session().read(), Some("abc"));

        handle_logout(&ctx).expect("logout should succeed");
        assert!(!ctx.session().is_authenticated());
    }

    #[test]
    fn logout_that_cannot_remove_the_token_fails() {
        let dir = tempfile::tempdir().expect("tempdir");
        let ctx = test_context("http://127.0.0.1:9", dir.path());
        ctx.session().set("tok").expect("session persists");
        // Swap the token file for a directory so removal fails.
        let token_file = dir.path().join("jwt.json");
        let raw = std::fs::read_to_string(&token_file).expect("token file");
        std::fs::remove_file(&token_file).expect("remove token file");
        std::fs::create_dir(&token_file).expect("blocking dir");

        let err = handle_logout(&ctx).expect_err("removal fails");
        assert_eq!(err.exit_code(), 3);
        assert!(err.display_message().contains("session storage remove failed"));

        std::fs::remove_dir(&token_file).expect("unblock");
        std::fs::write(&token_file, raw).expect("restore token file");
        assert_eq!(ctx.session().read(), Some("tok"));
    }

    #[tokio::test]
    async fn rejected_login_is_a_failure() {
        let server = MockServer::start_async().await;
        let dir = tempfile::tempdir().expect("tempdir");
        server.mock(|when, then| {
            when.method(POST).path("/v1/signin");
            then.status(401).json_body(error_envelope("invalid credentials"));
        });
        let ctx = test_context(&server.base_url(), dir.path());

        let err = handle_login(&ctx, args("wrong")).await.expect_err("rejected");
        assert_eq!(err.exit_code(), 3);
        assert_eq!(err.display_message(), "invalid credentials");
        assert!(!ctx.session().is_authenticated());
    }

    #[tokio::test]
    async fn blank_password_is_a_validation_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let ctx = test_context("http://127.0.0.1:9", dir.path());

        let err = handle_login(&ctx, args(" ")).await.expect_err("blank password");
        assert_eq!(err.exit_code(), 2);
        assert!(err.display_message().contains("password"));
    }
}

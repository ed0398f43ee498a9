#[cfg(test)]
use crate::features::auth::model::AuthenticatedUser;

#[cfg(test)]
use axum::{extract::Request, middleware::Next, Router};

#[cfg(test)]
pub fn create_reporter_user(id: impl Into<String>) -> AuthenticatedUser {
    AuthenticatedUser {
        id: id.into(),
        email: Some("reporter@example.com".to_string()),
        role: Some("user".to_string()),
    }
}

/// Wrap a router so every request carries `user` as its verified identity
#[cfg(test)]
pub fn with_authenticated_user(router: Router, user: AuthenticatedUser) -> Router {
    router.layer(axum::middleware::from_fn(
        move |mut request: Request, next: Next| {
            let user = user.clone();
            async move {
                request.extensions_mut().insert(user);
                next.run(request).await
            }
        },
    ))
}

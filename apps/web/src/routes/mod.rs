mod auth_callback;
mod config_error;
mod dashboard;
mod login;
pub(crate) mod paths;
mod signup;

pub(crate) use auth_callback::AuthCallbackPage;
pub(crate) use config_error::ConfigErrorPage;
pub(crate) use dashboard::DashboardPage;
pub(crate) use login::LoginPage;
pub(crate) use signup::SignUpPage;

use crate::features::auth::RequireAuth;
use leptos::prelude::*;
use leptos_router::components::{Redirect, Route, Routes};
use leptos_router::path;

#[component]
pub fn AppRoutes() -> impl IntoView {
    view! {
        <Routes fallback=|| view! { <Redirect path=paths::DASHBOARD /> }>
            <Route
                path=path!("/")
                view=|| view! { <RequireAuth><DashboardPage /></RequireAuth> }
            />
            <Route path=path!("/login") view=LoginPage />
            <Route path=path!("/signup") view=SignUpPage />
            <Route path=path!("/auth/callback") view=AuthCallbackPage />
        </Routes>
    }
}

use crate::features::auth::{firebase::FirebaseGateway, state::AuthProvider};
use crate::routes::AppRoutes;
use leptos::prelude::*;
use leptos_router::components::Router;

#[component]
pub fn App(gateway: FirebaseGateway) -> impl IntoView {
    view! {
        <AuthProvider gateway=gateway>
            <Router>
                <AppRoutes />
            </Router>
        </AuthProvider>
    }
}

use yew::prelude::*;
use yew_router::prelude::*;

use crate::components::student_form::StudentForm;

#[derive(Debug, Clone, Routable, PartialEq)]
pub enum Route {
    #[at("/")]
    Home,
    #[not_found]
    #[at("/404")]
    NotFound,
}

pub fn switch(route: Route) -> Html {
    log::debug!("Routing to: {:?}", route);
    match route {
        Route::Home => html! { <StudentForm /> },
        Route::NotFound => {
            log::warn!("404 - Route not found");
            html! {
                <div class="min-h-screen flex flex-col items-center justify-center gap-4">
                    <h1 class="text-3xl font-bold">{"404 Not Found"}</h1>
                    <Link<Route> to={Route::Home} classes="btn btn-primary">{"Back to the form"}</Link<Route>>
                </div>
            }
        }
    }
}

use std::rc::Rc;

use yew::prelude::*;

use crate::settings;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ToastKind {
    Success,
    Error,
}

impl ToastKind {
    fn alert_class(&self) -> &'static str {
        match self {
            ToastKind::Success => "alert-success",
            ToastKind::Error => "alert-error",
        }
    }

    fn icon(&self) -> &'static str {
        match self {
            ToastKind::Success => "fas fa-check-circle",
            ToastKind::Error => "fas fa-exclamation-circle",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: usize,
    pub message: String,
    pub kind: ToastKind,
}

#[derive(Debug, Default, PartialEq)]
struct ToastQueue {
    toasts: Vec<Toast>,
}

enum ToastAction {
    Push(Toast),
    Dismiss(usize),
}

impl Reducible for ToastQueue {
    type Action = ToastAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut toasts = self.toasts.clone();
        match action {
            ToastAction::Push(toast) => toasts.push(toast),
            ToastAction::Dismiss(id) => toasts.retain(|t| t.id != id),
        }
        Rc::new(ToastQueue { toasts })
    }
}

/// Handle for raising notifications from any component below [`ToastProvider`].
#[derive(Clone, PartialEq)]
pub struct ToastContext {
    notify: Callback<(String, ToastKind)>,
}

impl ToastContext {
    pub fn show_success(&self, message: impl Into<String>) {
        self.notify.emit((message.into(), ToastKind::Success));
    }

    pub fn show_error(&self, message: impl Into<String>) {
        self.notify.emit((message.into(), ToastKind::Error));
    }
}

#[derive(Properties, PartialEq)]
pub struct ToastProviderProps {
    pub children: Children,
}

#[function_component(ToastProvider)]
pub fn toast_provider(props: &ToastProviderProps) -> Html {
    let queue = use_reducer(ToastQueue::default);
    // Ids come from a counter outside the reducer so the timer knows which toast to drop
    let next_id = use_mut_ref(|| 0usize);

    let notify = {
        let dispatcher = queue.dispatcher();
        Callback::from(move |(message, kind): (String, ToastKind)| {
            log::debug!("Showing {:?} toast: {}", kind, message);
            let id = {
                let mut next_id = next_id.borrow_mut();
                *next_id += 1;
                *next_id
            };
            dispatcher.dispatch(ToastAction::Push(Toast { id, message, kind }));

            let dispatcher = dispatcher.clone();
            let duration_ms = settings::get_settings().toast_duration_ms;
            gloo_timers::callback::Timeout::new(duration_ms, move || {
                dispatcher.dispatch(ToastAction::Dismiss(id));
            })
            .forget();
        })
    };

    let context = ToastContext { notify };

    html! {
        <ContextProvider<ToastContext> context={context}>
            {props.children.clone()}
            <div class="toast toast-top toast-end z-50">
                {for queue.toasts.iter().map(|toast| {
                    let on_close = {
                        let dispatcher = queue.dispatcher();
                        let id = toast.id;
                        Callback::from(move |_| dispatcher.dispatch(ToastAction::Dismiss(id)))
                    };

                    html! {
                        <div key={toast.id} class={classes!("alert", toast.kind.alert_class(), "shadow-lg")}>
                            <i class={toast.kind.icon()}></i>
                            <span>{&toast.message}</span>
                            <button class="btn btn-sm btn-ghost btn-circle" onclick={on_close}>
                                <i class="fas fa-times"></i>
                            </button>
                        </div>
                    }
                })}
            </div>
        </ContextProvider<ToastContext>>
    }
}

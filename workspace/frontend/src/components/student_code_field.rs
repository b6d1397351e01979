use common::{CheckState, Field, FieldSpec};
use web_sys::HtmlInputElement;
use yew::prelude::*;

use super::form_field::FieldError;

#[derive(Properties, PartialEq)]
pub struct StudentCodeFieldProps {
    pub spec: FieldSpec,
    pub value: AttrValue,
    #[prop_or_default]
    pub error: Option<String>,
    pub check_state: CheckState,
    pub on_change: Callback<(Field, String)>,
    pub on_check: Callback<()>,
}

/// Student code input with its prefix and the existence-check trigger.
#[function_component(StudentCodeField)]
pub fn student_code_field(props: &StudentCodeFieldProps) -> Html {
    let spec = props.spec;
    let name = spec.field.as_str();
    let checking = props.check_state == CheckState::Checking;

    let oninput = {
        let on_change = props.on_change.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            on_change.emit((spec.field, input.value()));
        })
    };

    let onclick = {
        let on_check = props.on_check.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            on_check.emit(());
        })
    };

    html! {
        <div class="form-control w-full">
            <label class="label" for={name}>
                <span class="label-text font-semibold">{spec.label}</span>
            </label>
            <div class="flex items-center gap-2">
                <label class={classes!("input", "input-bordered", "flex", "items-center", "gap-2", props.error.as_ref().map(|_| "input-error"))}>
                    <span class="text-gray-500">{spec.prefix.unwrap_or_default()}</span>
                    <input
                        id={name}
                        name={name}
                        type={spec.kind.input_type()}
                        placeholder={spec.placeholder}
                        size={spec.size.map(|size| AttrValue::from(size.to_string()))}
                        value={props.value.clone()}
                        {oninput}
                    />
                </label>
                <button type="button" class="btn btn-outline btn-sm" disabled={checking} {onclick}>
                    {if checking { "Loading..." } else { "Check" }}
                </button>
                {match props.check_state {
                    CheckState::Found => html! {
                        <i class="fas fa-check-circle text-success text-xl" title="Already registered"></i>
                    },
                    _ => html! {},
                }}
            </div>
            <FieldError error={props.error.clone()} />
        </div>
    }
}

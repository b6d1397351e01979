use common::{Field, FieldKind, FieldSpec, PlaceOfLiving};
use web_sys::{HtmlInputElement, HtmlTextAreaElement};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct FieldErrorProps {
    pub error: Option<String>,
}

/// Inline message under an input.
#[function_component(FieldError)]
pub fn field_error(props: &FieldErrorProps) -> Html {
    match &props.error {
        Some(error) => html! {
            <label class="label">
                <span class="label-text-alt text-error">{error}</span>
            </label>
        },
        None => html! {},
    }
}

#[derive(Properties, PartialEq)]
pub struct FormFieldProps {
    pub spec: FieldSpec,
    pub value: AttrValue,
    #[prop_or_default]
    pub error: Option<String>,
    /// Selected branch, only read by the radio group
    #[prop_or_default]
    pub selected: Option<PlaceOfLiving>,
    pub on_change: Callback<(Field, String)>,
}

/// One catalogue-driven input with its label and inline error.
#[function_component(FormField)]
pub fn form_field(props: &FormFieldProps) -> Html {
    let spec = props.spec;
    let name = spec.field.as_str();

    let input = match spec.kind {
        FieldKind::Radio => {
            html! {
                <div class="flex gap-6">
                    {for PlaceOfLiving::ALL.iter().map(|place| {
                        let place = *place;
                        let onchange = {
                            let on_change = props.on_change.clone();
                            Callback::from(move |_: Event| {
                                on_change.emit((spec.field, place.as_str().to_string()));
                            })
                        };
                        html! {
                            <label class="label cursor-pointer gap-2">
                                <input
                                    type="radio"
                                    class="radio radio-primary"
                                    name={name}
                                    value={place.as_str()}
                                    checked={props.selected == Some(place)}
                                    {onchange}
                                />
                                <span class="label-text">{place.label()}</span>
                            </label>
                        }
                    })}
                </div>
            }
        }
        FieldKind::Textarea => {
            let oninput = {
                let on_change = props.on_change.clone();
                Callback::from(move |e: InputEvent| {
                    let textarea: HtmlTextAreaElement = e.target_unchecked_into();
                    on_change.emit((spec.field, textarea.value()));
                })
            };
            html! {
                <textarea
                    id={name}
                    name={name}
                    class={classes!("textarea", "textarea-bordered", props.error.as_ref().map(|_| "textarea-error"))}
                    placeholder={spec.placeholder}
                    value={props.value.clone()}
                    {oninput}
                />
            }
        }
        FieldKind::Text | FieldKind::Number => {
            let oninput = {
                let on_change = props.on_change.clone();
                Callback::from(move |e: InputEvent| {
                    let input: HtmlInputElement = e.target_unchecked_into();
                    on_change.emit((spec.field, input.value()));
                })
            };
            let input = html! {
                <input
                    id={name}
                    name={name}
                    type={spec.kind.input_type()}
                    class="grow"
                    placeholder={spec.placeholder}
                    size={spec.size.map(|size| AttrValue::from(size.to_string()))}
                    value={props.value.clone()}
                    {oninput}
                />
            };
            html! {
                <label class={classes!("input", "input-bordered", "flex", "items-center", "gap-2", props.error.as_ref().map(|_| "input-error"))}>
                    {match spec.prefix {
                        Some(prefix) => html! { <span class="text-gray-500">{prefix}</span> },
                        None => html! {},
                    }}
                    {input}
                </label>
            }
        }
    };

    html! {
        <div class="form-control w-full">
            <label class="label" for={name}>
                <span class="label-text font-semibold">{spec.label}</span>
            </label>
            {input}
            <FieldError error={props.error.clone()} />
        </div>
    }
}

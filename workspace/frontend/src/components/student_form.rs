use common::{
    ExistenceCheck, FIELDS, Field, SubmissionWorkflow, SubmitOutcome, WorkflowError, is_visible,
};
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use super::form_field::FormField;
use super::student_code_field::StudentCodeField;
use crate::api_client::{HttpRecordInsert, HttpRecordLookup};
use crate::common::toast::ToastContext;

const TITLE: &str = "Brainware University Data Collection";
const DESCRIPTION: &str = "This is a data collection form for Brainware University students. \
Please fill all the inputs in the form below carefully.";
const ACKNOWLEDGEMENT: &str = "I acknowledge that the information provided above is correct.";

/// The data-collection card.
///
/// Both workflows live for the lifetime of the component and mutate through
/// `&self`, so every state change is followed by a forced re-render.
#[function_component(StudentForm)]
pub fn student_form() -> Html {
    let workflow = use_memo((), |_| SubmissionWorkflow::new());
    let check = use_memo((), |_| ExistenceCheck::new());
    let rerender = use_force_update();
    let toast = use_context::<ToastContext>();

    let on_change = {
        let workflow = workflow.clone();
        let check = check.clone();
        let rerender = rerender.clone();
        Callback::from(move |(field, value): (Field, String)| {
            log::trace!("Field {} changed", field.as_str());
            workflow.set_value(field, value);
            if field == Field::StudentCode {
                check.code_changed();
            }
            rerender.force_update();
        })
    };

    let on_check = {
        let workflow = workflow.clone();
        let check = check.clone();
        let rerender = rerender.clone();
        Callback::from(move |_: ()| {
            let workflow = workflow.clone();
            let check = check.clone();
            let rerender = rerender.clone();
            spawn_local(async move {
                let lookup = HttpRecordLookup::on_request({
                    let rerender = rerender.clone();
                    Callback::from(move |_: ()| rerender.force_update())
                });
                let raw_code = workflow.value(Field::StudentCode);
                match check.check(&lookup, &raw_code).await {
                    Ok(state) => log::debug!("Existence check for {} finished: {:?}", raw_code, state),
                    Err(e) => log::debug!("Existence check not started: {}", e),
                }
                rerender.force_update();
            });
        })
    };

    let on_acknowledge = {
        let workflow = workflow.clone();
        let rerender = rerender.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            workflow.set_acknowledged(input.checked());
            rerender.force_update();
        })
    };

    let onsubmit = {
        let workflow = workflow.clone();
        let check = check.clone();
        let rerender = rerender.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let workflow = workflow.clone();
            let check = check.clone();
            let rerender = rerender.clone();
            let toast = toast.clone();
            spawn_local(async move {
                let insert = HttpRecordInsert::on_request({
                    let rerender = rerender.clone();
                    Callback::from(move |_: ()| rerender.force_update())
                });

                match workflow.submit(&insert).await {
                    Ok(SubmitOutcome::Submitted { message, payload }) => {
                        log::info!("Submitted record for {}", payload.student_code);
                        check.code_changed();
                        if let Some(toast) = &toast {
                            toast.show_success(message);
                        }
                    }
                    Ok(SubmitOutcome::Failed { message }) => {
                        if let Some(toast) = &toast {
                            toast.show_error(message);
                        }
                    }
                    Ok(SubmitOutcome::Invalid(errors)) => {
                        log::debug!("Form has {} invalid field(s)", errors.len());
                    }
                    Err(WorkflowError::NotAcknowledged) => {
                        if let Some(toast) = &toast {
                            toast.show_error("Please confirm the acknowledgement before submitting.");
                        }
                    }
                    Err(WorkflowError::Busy) => log::debug!("Submit already in flight"),
                }
                rerender.force_update();
            });
        })
    };

    let place_of_living = workflow.place_of_living();
    let fields = FIELDS
        .iter()
        .filter(|spec| is_visible(place_of_living, spec.field))
        .map(|spec| {
            let value = AttrValue::from(workflow.value(spec.field));
            let error = workflow.error_for(spec.field);
            if spec.field == Field::StudentCode {
                html! {
                    <StudentCodeField
                        key={spec.field.as_str()}
                        spec={*spec}
                        {value}
                        {error}
                        check_state={check.state()}
                        on_change={on_change.clone()}
                        on_check={on_check.clone()}
                    />
                }
            } else {
                html! {
                    <FormField
                        key={spec.field.as_str()}
                        spec={*spec}
                        {value}
                        {error}
                        selected={place_of_living}
                        on_change={on_change.clone()}
                    />
                }
            }
        });

    html! {
        <div class="min-h-screen bg-base-200 flex items-center justify-center p-4">
            <div class="card w-full max-w-3xl bg-base-100 shadow-xl">
                <div class="card-body">
                    <h2 class="card-title text-2xl">{TITLE}</h2>
                    <p class="text-sm text-gray-500">{DESCRIPTION}</p>
                    <form class="flex flex-col gap-4" {onsubmit}>
                        <div class="flex flex-col gap-4 max-h-[600px] overflow-y-auto">
                            {for fields}
                        </div>
                        <label class="label cursor-pointer justify-start gap-3">
                            <input
                                type="checkbox"
                                class="checkbox checkbox-primary"
                                checked={workflow.acknowledged()}
                                onchange={on_acknowledge}
                            />
                            <span class="label-text">{ACKNOWLEDGEMENT}</span>
                        </label>
                        <button type="submit" class="btn btn-primary" disabled={!workflow.can_submit()}>
                            {if workflow.is_submitting() { "Submitting..." } else { "Submit" }}
                        </button>
                    </form>
                </div>
            </div>
        </div>
    }
}

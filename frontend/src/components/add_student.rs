use shared::CreateStudentRequest;
use web_sys::HtmlInputElement;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct AddStudentProps {
    pub on_add: Callback<CreateStudentRequest>,
}

#[function_component(AddStudent)]
pub fn add_student(props: &AddStudentProps) -> Html {
    let name = use_state(String::new);
    let phone = use_state(String::new);
    let form_error = use_state(|| None::<String>);

    let on_name_change = {
        let name = name.clone();
        Callback::from(move |e: InputEvent| {
            name.set(e.target_unchecked_into::<HtmlInputElement>().value());
        })
    };
    let on_phone_change = {
        let phone = phone.clone();
        Callback::from(move |e: InputEvent| {
            phone.set(e.target_unchecked_into::<HtmlInputElement>().value());
        })
    };

    let onsubmit = {
        let name = name.clone();
        let phone = phone.clone();
        let form_error = form_error.clone();
        let on_add = props.on_add.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();

            if name.trim().is_empty() || phone.trim().is_empty() {
                form_error.set(Some("Name and phone are required".to_string()));
                return;
            }

            on_add.emit(CreateStudentRequest {
                name: name.trim().to_string(),
                phone: phone.trim().to_string(),
            });
            name.set(String::new());
            phone.set(String::new());
            form_error.set(None);
        })
    };

    html! {
        <form class="add-student" {onsubmit}>
            <input type="text" placeholder="Name" value={(*name).clone()} oninput={on_name_change} />
            <input type="tel" placeholder="Phone" value={(*phone).clone()} oninput={on_phone_change} />
            <button type="submit">{"Add student"}</button>
            {if let Some(error) = &*form_error {
                html! { <div class="form-error">{error.clone()}</div> }
            } else { html! {} }}
        </form>
    }
}

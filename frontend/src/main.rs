use shared::FilterOptions;
use yew::prelude::*;

mod components;
mod hooks;
mod services;

use components::add_student::AddStudent;
use components::notice_board::NoticeBoard;
use components::student_list::StudentList;
use hooks::use_students::use_students;
use services::api::ApiClient;

#[derive(Clone, Copy, PartialEq)]
enum Tab {
    Home,
    Finance,
}

#[function_component(App)]
fn app() -> Html {
    let api_client = use_memo((), |_| ApiClient::new());
    let active_tab = use_state(|| Tab::Home);
    let filter = use_state(FilterOptions::default);

    let students = use_students(&api_client);

    let select_tab = |tab: Tab| {
        let active_tab = active_tab.clone();
        Callback::from(move |_: MouseEvent| active_tab.set(tab))
    };
    let on_filter_change = {
        let filter = filter.clone();
        Callback::from(move |next: FilterOptions| filter.set(next))
    };
    let tab_class = |tab: Tab| classes!("tab", (*active_tab == tab).then_some("active"));

    html! {
        <>
            <header class="header">
                <div class="container">
                    <h1>{"Club Manager"}</h1>
                    <nav class="tabs">
                        <button class={tab_class(Tab::Home)} onclick={select_tab(Tab::Home)}>{"Home"}</button>
                        <button class={tab_class(Tab::Finance)} onclick={select_tab(Tab::Finance)}>{"Finance"}</button>
                    </nav>
                </div>
            </header>

            <main class="main">
                <div class="container">
                    {match *active_tab {
                        Tab::Home => html! {
                            <NoticeBoard api_client={(*api_client).clone()} />
                        },
                        Tab::Finance => html! {
                            <>
                                <AddStudent on_add={students.actions.add_student.clone()} />
                                {if let Some(error) = &students.error {
                                    html! { <div class="error-message">{error.clone()}</div> }
                                } else { html! {} }}
                                {if students.loading {
                                    html! { <div class="loading">{"Loading students..."}</div> }
                                } else {
                                    html! {
                                        <StudentList
                                            roster={students.roster.clone()}
                                            filter={*filter}
                                            on_filter_change={on_filter_change}
                                            on_toggle={students.actions.toggle_payment.clone()}
                                        />
                                    }
                                }}
                            </>
                        },
                    }}
                </div>
            </main>

            <footer class="footer">
                <div class="container">
                    <span>{"Club Manager"}</span>
                </div>
            </footer>
        </>
    }
}

fn main() {
    yew::Renderer::<App>::new().render();
}

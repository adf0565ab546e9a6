use shared::{Event, Notice};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::services::api::ApiClient;

#[derive(Properties, PartialEq)]
pub struct NoticeBoardProps {
    pub api_client: ApiClient,
}

/// Home tab: current notices and upcoming events, read-only
#[function_component(NoticeBoard)]
pub fn notice_board(props: &NoticeBoardProps) -> Html {
    let notices = use_state(Vec::<Notice>::new);
    let events = use_state(Vec::<Event>::new);

    {
        let api_client = props.api_client.clone();
        let notices = notices.clone();
        let events = events.clone();

        use_effect_with((), move |_| {
            spawn_local(async move {
                match api_client.get_notices().await {
                    Ok(data) => notices.set(data),
                    Err(e) => gloo::console::error!("Failed to fetch notices:", e),
                }
                match api_client.get_events().await {
                    Ok(data) => events.set(data),
                    Err(e) => gloo::console::error!("Failed to fetch events:", e),
                }
            });
            || ()
        });
    }

    html! {
        <div class="notice-board">
            <section class="notices">
                <h2>{"Notices"}</h2>
                {if notices.is_empty() {
                    html! { <p class="empty">{"No notices"}</p> }
                } else {
                    html! {
                        <ul>
                            {for notices.iter().map(|notice| html! {
                                <li key={notice.id} class={classes!("notice", notice.priority.as_str())}>
                                    <h3>{notice.title.clone()}</h3>
                                    <p>{notice.content.clone()}</p>
                                </li>
                            })}
                        </ul>
                    }
                }}
            </section>

            <section class="events">
                <h2>{"Events"}</h2>
                {if events.is_empty() {
                    html! { <p class="empty">{"No upcoming events"}</p> }
                } else {
                    html! {
                        <ul>
                            {for events.iter().map(|event| html! {
                                <li key={event.id} class={classes!("event", event.event_type.as_str())}>
                                    <h3>{event.title.clone()}</h3>
                                    <span class="event-date">{event.date.format("%d/%m/%Y").to_string()}</span>
                                    {if let Some(location) = &event.location {
                                        html! { <span class="event-location">{location.clone()}</span> }
                                    } else { html! {} }}
                                    <p>{event.description.clone()}</p>
                                </li>
                            })}
                        </ul>
                    }
                }}
            </section>
        </div>
    }
}

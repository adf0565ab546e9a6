use std::cell::RefCell;

use chrono::{DateTime, Utc};
use shared::roster::{sync_payment, OptimisticToggle};
use shared::{CreateStudentRequest, RosterState};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::services::api::ApiClient;

pub struct UseStudentsResult {
    pub roster: RosterState,
    pub loading: bool,
    pub error: Option<String>,
    pub actions: UseStudentsActions,
}

#[derive(Clone, PartialEq)]
pub struct UseStudentsActions {
    pub refresh: Callback<()>,
    /// (student id, month, year)
    pub toggle_payment: Callback<(i64, u32, i32)>,
    pub add_student: Callback<CreateStudentRequest>,
}

/// Toggle against the latest roster and store the result in its place
fn apply_toggle(
    latest: &RefCell<RosterState>,
    student_id: i64,
    month: u32,
    year: i32,
    now: DateTime<Utc>,
) -> Option<OptimisticToggle> {
    let toggle = latest.borrow().toggle_payment(student_id, month, year, now)?;
    *latest.borrow_mut() = toggle.state.clone();
    Some(toggle)
}

/// Owns the roster shown on the finance tab.
///
/// Payment toggles are applied locally first and synced in the background;
/// a failed sync is logged and the local view is left as it is. Callbacks
/// read the roster from `latest`, so toggles fired before a re-render still
/// build on each other.
#[hook]
pub fn use_students(api_client: &ApiClient) -> UseStudentsResult {
    let roster = use_state(RosterState::default);
    let latest = use_mut_ref(RosterState::default);
    let loading = use_state(|| true);
    let error = use_state(|| None::<String>);

    let refresh = {
        let api_client = api_client.clone();
        let roster = roster.clone();
        let latest = latest.clone();
        let loading = loading.clone();
        let error = error.clone();

        use_callback((), move |_, _| {
            let api_client = api_client.clone();
            let roster = roster.clone();
            let latest = latest.clone();
            let loading = loading.clone();
            let error = error.clone();

            spawn_local(async move {
                loading.set(true);

                match api_client.get_students().await {
                    Ok(students) => {
                        let fresh = RosterState::new(students);
                        *latest.borrow_mut() = fresh.clone();
                        roster.set(fresh);
                        error.set(None);
                    }
                    Err(e) => {
                        gloo::console::error!("Failed to fetch students:", e.clone());
                        error.set(Some(e));
                    }
                }

                loading.set(false);
            });
        })
    };

    {
        let refresh = refresh.clone();
        use_effect_with((), move |_| {
            refresh.emit(());
            || ()
        });
    }

    let toggle_payment = {
        let api_client = api_client.clone();
        let roster = roster.clone();
        let latest = latest.clone();

        use_callback((), move |(student_id, month, year): (i64, u32, i32), _| {
            let Some(toggle) = apply_toggle(&latest, student_id, month, year, Utc::now()) else {
                gloo::console::warn!(format!(
                    "Cannot toggle payment for student {} in {}/{}",
                    student_id, month, year
                ));
                return;
            };
            roster.set(toggle.state.clone());

            let api_client = api_client.clone();
            spawn_local(async move {
                if !sync_payment(&api_client, &toggle).await {
                    gloo::console::error!(format!(
                        "Payment sync failed for student {} ({}/{})",
                        toggle.student_id, toggle.request.month, toggle.request.year
                    ));
                }
            });
        })
    };

    let add_student = {
        let api_client = api_client.clone();
        let error = error.clone();
        let refresh = refresh.clone();

        use_callback((), move |request: CreateStudentRequest, _| {
            let api_client = api_client.clone();
            let error = error.clone();
            let refresh = refresh.clone();

            spawn_local(async move {
                match api_client.add_student(&request).await {
                    Ok(_) => refresh.emit(()),
                    Err(e) => {
                        gloo::console::error!("Failed to add student:", e.clone());
                        error.set(Some(e));
                    }
                }
            });
        })
    };

    UseStudentsResult {
        roster: (*roster).clone(),
        loading: *loading,
        error: (*error).clone(),
        actions: UseStudentsActions {
            refresh,
            toggle_payment,
            add_student,
        },
    }
}

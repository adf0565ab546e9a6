use shared::{is_valid_period, FilterOptions, PaymentStatus, RosterState};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct StudentListProps {
    pub roster: RosterState,
    pub filter: FilterOptions,
    pub on_filter_change: Callback<FilterOptions>,
    /// (student id, month, year)
    pub on_toggle: Callback<(i64, u32, i32)>,
}

fn month_name(month: u32) -> &'static str {
    match month {
        1 => "January", 2 => "February", 3 => "March", 4 => "April",
        5 => "May", 6 => "June", 7 => "July", 8 => "August",
        9 => "September", 10 => "October", 11 => "November", 12 => "December",
        _ => "Unknown",
    }
}

/// Move the filter period by one month in either direction, stopping at the
/// first and last billing periods the server accepts
fn shift_month(filter: FilterOptions, forward: bool) -> FilterOptions {
    let (month, year) = match (filter.month, forward) {
        (12, true) => (1, filter.year + 1),
        (1, false) => (12, filter.year - 1),
        (m, true) => (m + 1, filter.year),
        (m, false) => (m - 1, filter.year),
    };
    if !is_valid_period(month, year) {
        return filter;
    }
    FilterOptions { month, year, ..filter }
}

#[function_component(StudentList)]
pub fn student_list(props: &StudentListProps) -> Html {
    let filter = props.filter;
    let summary = props.roster.summary(filter.month, filter.year);

    let prev_month = {
        let on_filter_change = props.on_filter_change.clone();
        Callback::from(move |_: MouseEvent| on_filter_change.emit(shift_month(filter, false)))
    };
    let next_month = {
        let on_filter_change = props.on_filter_change.clone();
        Callback::from(move |_: MouseEvent| on_filter_change.emit(shift_month(filter, true)))
    };
    let toggle_unpaid = {
        let on_filter_change = props.on_filter_change.clone();
        Callback::from(move |_: Event| {
            on_filter_change.emit(FilterOptions {
                show_only_unpaid: !filter.show_only_unpaid,
                ..filter
            })
        })
    };

    html! {
        <section class="student-list">
            <div class="period-header">
                <button class="nav-btn" onclick={prev_month}>{"‹"}</button>
                <h2>{format!("{} {}", month_name(filter.month), filter.year)}</h2>
                <button class="nav-btn" onclick={next_month}>{"›"}</button>
            </div>

            <div class="summary">
                <span>{format!("Students: {}", summary.total)}</span>
                <span class="paid">{format!("Paid: {}", summary.paid)}</span>
                <span class="unpaid">{format!("Unpaid: {}", summary.unpaid)}</span>
                <span>{format!("{:.0}% paid", summary.paid_percentage)}</span>
            </div>

            <label class="filter">
                <input type="checkbox" checked={filter.show_only_unpaid} onchange={toggle_unpaid} />
                {"Show only unpaid"}
            </label>

            <ul>
                {for props.roster.filtered(&filter).into_iter().map(|student| {
                    let status = student.payment_status(filter.month, filter.year);
                    let onclick = {
                        let on_toggle = props.on_toggle.clone();
                        let student_id = student.id;
                        Callback::from(move |_: MouseEvent| {
                            on_toggle.emit((student_id, filter.month, filter.year))
                        })
                    };
                    let (class, label) = match status {
                        PaymentStatus::Paid => ("status-btn paid", "Paid"),
                        PaymentStatus::Unpaid => ("status-btn unpaid", "Unpaid"),
                    };

                    html! {
                        <li key={student.id} class="student-row">
                            <div class="student-info">
                                <span class="student-name">{student.name.clone()}</span>
                                <span class="student-phone">{student.phone.clone()}</span>
                            </div>
                            <button {class} {onclick}>{label}</button>
                        </li>
                    }
                })}
            </ul>
        </section>
    }
}

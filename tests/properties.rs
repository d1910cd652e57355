//! Property-based tests for case filtering, pagination, notifications and
//! click mapping.

use incident_core::cases::{case_matches, filter_cases, CaseStore, StatusFilter};
use incident_core::floor_plan::{map_click, ImageRect, PointerEvent};
use incident_core::logging::LogContext;
use incident_core::models::{Case, CaseStatus};
use incident_core::notifications::{NotificationCenter, Severity};
use proptest::prelude::*;

fn status_strategy() -> impl Strategy<Value = CaseStatus> {
    prop_oneof![
        Just(CaseStatus::Open),
        Just(CaseStatus::InProgress),
        Just(CaseStatus::Closed),
    ]
}

fn filter_strategy() -> impl Strategy<Value = StatusFilter> {
    prop_oneof![
        Just(StatusFilter::All),
        status_strategy().prop_map(StatusFilter::Only),
    ]
}

fn cases_strategy() -> impl Strategy<Value = Vec<Case>> {
    prop::collection::vec(("[a-zA-Z ]{0,12}", status_strategy()), 0..60).prop_map(|items| {
        items
            .into_iter()
            .enumerate()
            .map(|(i, (title, status))| Case::new(&format!("case-{}", i), &title, status))
            .collect()
    })
}

proptest! {
    #[test]
    fn filtered_is_ordered_predicate_subset(
        cases in cases_strategy(),
        filter in filter_strategy(),
        term in "[a-zA-Z]{0,3}",
    ) {
        let expected: Vec<&str> = cases
            .iter()
            .filter(|c| {
                filter.matches(c.status)
                    && c.title.to_lowercase().contains(&term.to_lowercase())
            })
            .map(|c| c.id.as_str())
            .collect();
        let actual: Vec<&str> = filter_cases(&cases, filter, &term)
            .into_iter()
            .map(|c| c.id.as_str())
            .collect();
        prop_assert_eq!(actual, expected);
    }

    #[test]
    fn current_page_is_contiguous_slice(
        cases in cases_strategy(),
        filter in filter_strategy(),
        page_size in 1usize..15,
        page_pick in 0usize..10,
    ) {
        let mut store = CaseStore::new(page_size, LogContext::new("prop"));
        store.set_cases(cases);
        store.set_status_filter(filter);

        let pages = store.total_pages().max(1);
        let page = page_pick % pages + 1;
        store.go_to_page(page).unwrap();

        let filtered: Vec<String> = store.filtered_cases().iter().map(|c| c.id.clone()).collect();
        let current: Vec<String> = store.current_cases().iter().map(|c| c.id.clone()).collect();

        prop_assert!(current.len() <= page_size);
        let start = (page - 1) * page_size;
        let end = (start + page_size).min(filtered.len());
        prop_assert_eq!(&current[..], &filtered[start.min(end)..end]);
        for case in store.current_cases() {
            prop_assert!(case_matches(case, filter, ""));
        }
    }

    #[test]
    fn filter_or_search_change_resets_page(
        cases in cases_strategy(),
        filter in filter_strategy(),
        term in "[a-z]{0,2}",
    ) {
        let mut store = CaseStore::new(5, LogContext::new("prop"));
        store.set_cases(cases);
        if store.total_pages() >= 2 {
            store.go_to_page(2).unwrap();
        }
        store.set_status_filter(filter);
        prop_assert_eq!(store.current_page(), 1);

        if store.total_pages() >= 2 {
            store.go_to_page(2).unwrap();
        }
        store.set_search_term(&term);
        prop_assert_eq!(store.current_page(), 1);
    }

    #[test]
    fn add_then_remove_restores_notifications(
        existing in prop::collection::vec("[a-z ]{1,20}", 0..8),
        message in "[a-z ]{1,20}",
    ) {
        let center = NotificationCenter::new();
        for m in &existing {
            center.add_notification(m, Severity::Info);
        }
        let before: Vec<String> = center.notifications().into_iter().map(|n| n.id).collect();

        let id = center.add_notification(&message, Severity::Warning);
        prop_assert!(center.remove_notification(&id));

        let after: Vec<String> = center.notifications().into_iter().map(|n| n.id).collect();
        prop_assert_eq!(after, before);
    }

    #[test]
    fn in_bounds_clicks_map_into_unit_square(
        left in -500.0f64..500.0,
        top in -500.0f64..500.0,
        width in 1.0f64..2000.0,
        height in 1.0f64..2000.0,
        fx in 0.0f64..=1.0,
        fy in 0.0f64..=1.0,
    ) {
        let rect = ImageRect { left, top, width, height };
        let event = PointerEvent {
            client_x: left + fx * width,
            client_y: top + fy * height,
        };
        let loc = map_click(&rect, &event).unwrap();
        prop_assert!((-1e-9..=1.0 + 1e-9).contains(&loc.x));
        prop_assert!((-1e-9..=1.0 + 1e-9).contains(&loc.y));
    }
}

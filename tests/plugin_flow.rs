use std::collections::BTreeMap;
use std::time::Instant;

use zentask::screens::Route;
use zentask::ui::viewmodel::BodyView;
use zentask::ui::GridView;
use zentask::worker::{WorkerMessage, WorkerResponse, ZenTaskWorker};
use zentask::{handle_event, initialize, Action, AppState, Config, Event, InputMode};

fn send(state: &mut AppState, event: Event) -> Vec<Action> {
    handle_event(state, &event, Instant::now()).unwrap().1
}

fn loaded(config: &Config, worker: &mut ZenTaskWorker) -> AppState {
    let mut state = initialize(config);
    let response = worker.handle_message(WorkerMessage::load_records());
    assert!(matches!(response, WorkerResponse::RecordsLoaded { .. }));
    send(&mut state, Event::WorkerResponse(response));
    state
}

fn table_grid(state: &AppState, cols: usize) -> GridView {
    match state.compute_viewmodel(40, cols).body {
        BodyView::Table(view) => view.grid,
        other => panic!("expected a table screen, got {other:?}"),
    }
}

#[test]
fn tables_load_from_worker_and_switch_to_cards_when_narrow() {
    let mut worker = ZenTaskWorker::default();
    let mut state = initialize(&Config::default());
    send(&mut state, Event::Navigate(Route::Interventions));
    assert!(table_grid(&state, 120).is_loading());

    let response = worker.handle_message(WorkerMessage::load_records());
    send(&mut state, Event::WorkerResponse(response));

    assert!(matches!(table_grid(&state, 120), GridView::Table(_)));
    assert!(matches!(table_grid(&state, 60), GridView::Cards(_)));
}

#[test]
fn committed_search_narrows_rows() {
    let mut worker = ZenTaskWorker::default();
    let mut state = loaded(&Config::default(), &mut worker);
    send(&mut state, Event::Navigate(Route::Clients));
    assert_eq!(state.table().unwrap().page_info().filtered, 3);

    send(&mut state, Event::StartSearch);
    for c in "xyz".chars() {
        send(&mut state, Event::Char(c));
    }
    send(&mut state, Event::Enter);

    assert_eq!(state.input_mode, InputMode::Normal);
    let info = state.table().unwrap().page_info();
    assert_eq!((info.filtered, info.total), (1, 3));
}

#[test]
fn created_record_is_journaled_and_toasted() {
    let mut worker = ZenTaskWorker::default();
    let mut state = loaded(&Config::default(), &mut worker);
    send(&mut state, Event::Navigate(Route::Activities));
    send(&mut state, Event::NewRecord);
    for c in "Collaudo".chars() {
        send(&mut state, Event::Char(c));
    }

    let actions = send(&mut state, Event::Submit);
    let [Action::PostToWorker(message)] = actions.as_slice() else {
        panic!("expected a submission, got {actions:?}");
    };
    let response = worker.handle_message(message.clone());
    assert!(matches!(response, WorkerResponse::FormSubmitted { .. }));

    send(&mut state, Event::WorkerResponse(response));
    assert_eq!(state.input_mode, InputMode::Normal);
    let vm = state.compute_viewmodel(40, 120);
    let toast = vm.footer.toast.expect("success toast");
    assert_eq!(toast.message, "Activities: record created");

    send(&mut state, Event::Down);
    assert!(state.compute_viewmodel(40, 120).footer.toast.is_none());
}

#[test]
fn operators_cannot_edit_company_settings() {
    let mut map = BTreeMap::new();
    map.insert("role".to_string(), "operatore".to_string());
    let config = Config::from_zellij(&map);
    let mut worker = ZenTaskWorker::default();
    let mut state = loaded(&config, &mut worker);

    send(&mut state, Event::Navigate(Route::Settings));
    send(&mut state, Event::Enter);
    assert_eq!(state.input_mode, InputMode::Normal);

    match state.compute_viewmodel(40, 120).body {
        BodyView::Form(view) => assert!(view.restricted.is_some()),
        other => panic!("expected the settings form, got {other:?}"),
    }
}

#[test]
fn page_size_option_limits_rows() {
    let mut map = BTreeMap::new();
    map.insert("page_size".to_string(), "2".to_string());
    let mut worker = ZenTaskWorker::default();
    let mut state = loaded(&Config::from_zellij(&map), &mut worker);
    send(&mut state, Event::Navigate(Route::Interventions));

    let info = state.table().unwrap().page_info();
    assert_eq!((info.page, info.pages), (1, 3));

    send(&mut state, Event::NextPage);
    send(&mut state, Event::NextPage);
    send(&mut state, Event::NextPage);
    assert_eq!(state.table().unwrap().page_info().page, 3);
}

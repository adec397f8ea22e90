mod support;

use notefrais_app::{App, Route};
use notefrais_core::store::StoreError;
use notefrais_core::view::RenderPlan;

use support::{RecordingNavigator, ScriptedStore, bill, employee};

fn four_bills() -> Vec<notefrais_core::bill::Bill> {
    vec![
        bill("encore", "2004-04-04"),
        bill("test1", "2001-01-01"),
        bill("test3", "2003-03-03"),
        bill("test2", "2002-02-02"),
    ]
}

#[test]
fn load_returns_the_bills_ordered_latest_first() {
    let store = ScriptedStore::new(vec![Ok(four_bills())]);
    let navigator = RecordingNavigator::new();
    let app = App::new(&store, &navigator, employee());
    let page = app.bills_page();

    let state = page.load().expect("load");
    let RenderPlan::List(bills) = state.plan() else {
        panic!("expected the list plan, got {:?}", state.plan());
    };

    let dates: Vec<&str> = bills.iter().map(|bill| bill.date.as_str()).collect();
    assert_eq!(dates, ["2004-04-04", "2003-03-03", "2002-02-02", "2001-01-01"]);
}

#[test]
fn an_empty_store_still_renders_the_list() {
    let store = ScriptedStore::new(vec![Ok(Vec::new())]);
    let navigator = RecordingNavigator::new();
    let app = App::new(&store, &navigator, employee());
    let page = app.bills_page();

    let state = page.load().expect("load");
    assert_eq!(state.plan(), RenderPlan::List(&[]));
}

#[test]
fn a_store_failure_surfaces_its_message_verbatim() {
    let store = ScriptedStore::new(vec![Err(StoreError::new("Erreur 404"))]);
    let navigator = RecordingNavigator::new();
    let app = App::new(&store, &navigator, employee());
    let page = app.bills_page();

    let state = page.load().expect("load");
    assert_eq!(state.plan(), RenderPlan::Error("Erreur 404"));
}

#[test]
fn opening_a_receipt_exposes_the_stored_file() {
    let store = ScriptedStore::new(Vec::new());
    let navigator = RecordingNavigator::new();
    let app = App::new(&store, &navigator, employee());
    let page = app.bills_page();

    let mut with_receipt = bill("test1", "2001-01-01");
    with_receipt.file_url = "https://uploads.example/facture.png".to_string();
    with_receipt.file_name = "facture.png".to_string();

    let preview = page.open_receipt(&with_receipt).expect("preview");
    assert_eq!(preview.file_url, "https://uploads.example/facture.png");
    assert_eq!(preview.file_name, "facture.png");
}

#[test]
fn the_new_bill_shortcut_navigates_exactly_once() {
    let store = ScriptedStore::new(Vec::new());
    let navigator = RecordingNavigator::new();
    let app = App::new(&store, &navigator, employee());
    let page = app.bills_page();

    page.go_to_new_bill();

    assert_eq!(navigator.routes(), [Route::NewBill]);
    assert_eq!(Route::NewBill.path(), "#employee/bill/new");
}

use crate::errors::ServerError;
use crate::router::handle;
use crate::tests::utils::{form_request, get, read_body, sqlite_gateway, RecordingGateway};
use serde_json::json;

#[test]
fn home_page_links_every_entity() {
    let gw = RecordingGateway::new();

    let resp = handle(get("/"), &gw).expect("Handler failed");

    assert_eq!(resp.status(), 200);
    let body = read_body(resp);
    for route in ["/camp", "/building", "/room", "/booking", "/employee"] {
        assert!(body.contains(&format!("href=\"{route}\"")), "missing {route}");
    }
}

#[test]
fn list_page_sorts_by_the_requested_column() {
    let gw = RecordingGateway::new().reply(
        "Cities_Read_All",
        vec![
            json!({"CityID": 1, "CityName": "Alta"}),
            json!({"CityID": 2, "CityName": "Bodø"}),
            json!({"CityID": 3, "CityName": "Narvik"}),
        ],
    );

    let resp = handle(get("/city?sort=CityName&dir=desc"), &gw).expect("Handler failed");

    assert_eq!(resp.status(), 200);
    let body = read_body(resp);
    let narvik = body.find("Narvik").unwrap();
    let alta = body.find("Alta").unwrap();
    assert!(narvik < alta);
}

#[test]
fn booking_list_shows_status_badges() {
    let gw = RecordingGateway::new().reply(
        "Booking_Read_All",
        vec![json!({
            "BookingID": 1, "RoomID": 1, "RoomNumber": 101, "EmployeeID": 1,
            "FirstName": "Kari", "LastName": "Nordmann",
            "StartDate": "2000-01-01", "EndDate": "2000-01-05",
            "Active": false, "Finished": true
        })],
    );

    let body = read_body(handle(get("/booking"), &gw).expect("Handler failed"));

    assert!(body.contains("Finished"));
    assert!(body.contains("Nordmann"));
}

#[test]
fn new_form_offers_referenced_entities() {
    let gw = RecordingGateway::new().reply(
        "Cities_Read_All",
        vec![json!({"CityID": 5, "CityName": "Hammerfest"})],
    );

    let body = read_body(handle(get("/camp/new"), &gw).expect("Handler failed"));

    assert!(body.contains(r#"<option value="5">Hammerfest</option>"#));
}

#[test]
fn successful_create_redirects_to_the_list() {
    let gw = sqlite_gateway();

    let resp = handle(form_request("/city/new", &[("CityName", "Kirkenes")]), &gw)
        .expect("Handler failed");

    assert_eq!(resp.status(), 303);
    assert_eq!(resp.headers().get("Location").unwrap(), "/city");

    let body = read_body(handle(get("/city"), &gw).expect("Handler failed"));
    assert!(body.contains("Kirkenes"));
}

#[test]
fn booking_in_the_past_re_renders_the_form() {
    let gw = RecordingGateway::new();

    let resp = handle(
        form_request(
            "/booking/new",
            &[
                ("RoomID", "1"),
                ("EmployeeID", "1"),
                ("StartDate", "2000-01-01"),
                ("EndDate", "2000-01-10"),
            ],
        ),
        &gw,
    )
    .expect("Handler failed");

    assert_eq!(resp.status(), 400);
    let body = read_body(resp);
    assert!(body.contains("Start date cannot be in the past"));
    assert!(body.contains(r#"value="2000-01-10""#));
    assert!(!gw.procedures().contains(&"Booking_Create".to_string()));
}

#[test]
fn edit_form_is_filled_from_the_stored_row() {
    let gw = RecordingGateway::new().reply(
        "Nationalities_Read_ById",
        vec![json!({"NationalityID": 4, "Nationality": "Sami"})],
    );

    let body = read_body(handle(get("/nationality/edit?NationalityID=4"), &gw).expect("Handler failed"));

    assert!(body.contains(r#"name="NationalityID" value="4""#));
    assert!(body.contains(r#"value="Sami""#));
}

#[test]
fn delete_form_redirects_after_removal() {
    let gw = RecordingGateway::new();

    let resp = handle(form_request("/room/delete", &[("RoomID", "8")]), &gw)
        .expect("Handler failed");

    assert_eq!(resp.status(), 303);
    assert_eq!(gw.procedures(), vec!["Room_Delete"]);
}

#[test]
fn unknown_page_is_not_found() {
    let gw = RecordingGateway::new();
    let result = handle(get("/spaceship"), &gw);
    assert!(matches!(result, Err(ServerError::NotFound)));
}

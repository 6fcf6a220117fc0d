use crate::router::handle;
use crate::tests::utils::{get, json_request, read_json, sqlite_gateway, RecordingGateway};
use serde_json::json;

#[test]
fn list_returns_the_gateway_rows() {
    let gw = RecordingGateway::new().reply(
        "Cities_Read_All",
        vec![json!({"CityID": 1, "CityName": "Bergen"})],
    );

    let resp = handle(get("/api/city"), &gw).expect("Handler failed");

    assert_eq!(resp.status(), 200);
    assert_eq!(read_json(resp), json!([{"CityID": 1, "CityName": "Bergen"}]));
    assert_eq!(gw.procedures(), vec!["Cities_Read_All"]);
}

#[test]
fn list_failure_uses_the_plural_message() {
    let gw = RecordingGateway::new().fail("Room_Read_All", "disk I/O error");

    let resp = handle(get("/api/room"), &gw).expect("Handler failed");

    assert_eq!(resp.status(), 500);
    let body = read_json(resp);
    assert_eq!(body["error"], "Failed to fetch rooms");
    assert!(body["details"].as_str().unwrap().contains("disk I/O error"));
}

#[test]
fn get_by_id_is_not_found_when_no_row_comes_back() {
    let gw = RecordingGateway::new();
    let resp = handle(get("/api/employee?EmployeeID=42"), &gw).expect("Handler failed");
    assert_eq!(resp.status(), 404);
    assert_eq!(gw.procedures(), vec!["Employee_Read_ById"]);
}

#[test]
fn update_requires_the_identifier() {
    let gw = RecordingGateway::new();
    let req = json_request("PUT", "/api/camp", json!({"CampusName": "North"}));

    let resp = handle(req, &gw).expect("Handler failed");

    assert_eq!(resp.status(), 400);
    assert_eq!(read_json(resp)["error"], "CampusID is required");
    assert!(gw.calls().is_empty());
}

#[test]
fn delete_requires_the_identifier() {
    let gw = RecordingGateway::new();
    let req = json_request("DELETE", "/api/building", json!({}));
    let resp = handle(req, &gw).expect("Handler failed");
    assert_eq!(resp.status(), 400);
    assert!(gw.calls().is_empty());
}

#[test]
fn delete_confirms_with_the_entity_name() {
    let gw = RecordingGateway::new();
    let req = json_request("DELETE", "/api/nationality?NationalityID=3", json!({}));
    let resp = handle(req, &gw).expect("Handler failed");
    assert_eq!(resp.status(), 200);
    assert_eq!(read_json(resp)["message"], "Nationality deleted successfully");
}

#[test]
fn deleting_a_missing_room_reports_the_procedure_message() {
    let gw = sqlite_gateway();
    let req = json_request("DELETE", "/api/room?RoomID=999", json!({}));

    let resp = handle(req, &gw).expect("Handler failed");

    assert_eq!(resp.status(), 500);
    let body = read_json(resp);
    assert_eq!(body["error"], "Failed to delete room");
    assert!(body["details"].as_str().unwrap().contains("Room not found"));
}

#[test]
fn room_free_beds_may_not_exceed_capacity() {
    let gw = RecordingGateway::new();
    let req = json_request(
        "POST",
        "/api/room",
        json!({"BuildingID": 1, "RoomNumber": 1, "RoomType": 1,
               "FloorNumber": 1, "Capacity": 2, "FreeBeds": 5}),
    );
    let resp = handle(req, &gw).expect("Handler failed");
    assert_eq!(resp.status(), 400);
    assert!(gw.calls().is_empty());
}

#[test]
fn unknown_api_route_is_json_not_found() {
    let gw = RecordingGateway::new();
    let resp = handle(get("/api/spaceship"), &gw).expect("Handler failed");
    assert_eq!(resp.status(), 404);
    assert_eq!(read_json(resp)["error"], "Not Found");
}

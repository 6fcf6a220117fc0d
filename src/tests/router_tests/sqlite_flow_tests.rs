use crate::gateway::SqliteGateway;
use crate::router::handle;
use crate::tests::utils::{get, json_request, read_json, sqlite_gateway};
use serde_json::{json, Value};

fn post(gw: &SqliteGateway, uri: &str, body: Value) -> Value {
    let resp = handle(json_request("POST", uri, body), gw).expect("Handler failed");
    let status = resp.status();
    let body = read_json(resp);
    assert_eq!(status, 200, "{uri}: {body}");
    body
}

fn put(gw: &SqliteGateway, uri: &str, body: Value) -> (u16, Value) {
    let resp = handle(json_request("PUT", uri, body), gw).expect("Handler failed");
    let status = resp.status().as_u16();
    (status, read_json(resp))
}

fn book(gw: &SqliteGateway, room_id: i64, employee_id: i64, start: &str, end: &str) -> Value {
    post(
        gw,
        "/api/booking",
        json!({"RoomID": room_id, "EmployeeID": employee_id, "StartDate": start, "EndDate": end}),
    )
}

fn hire(gw: &SqliteGateway, first_name: &str) -> i64 {
    let nationality = post(gw, "/api/nationality", json!({"Nationality": "Swedish"}));
    let employee = post(
        gw,
        "/api/employee",
        json!({
            "FirstName": first_name, "LastName": "Svensson",
            "NationalityID": nationality["NationalityID"],
            "PhoneNumber": "+46 70 000 00 00", "Email": "svensson@example.com",
            "JobTitle": "Electrician", "Salary": 42000
        }),
    );
    employee["EmployeeID"].as_i64().unwrap()
}

fn room(gw: &SqliteGateway, room_id: i64) -> Value {
    let resp = handle(get(&format!("/api/room?RoomID={room_id}")), gw).expect("Handler failed");
    read_json(resp)
}

/// City, camp, building, room type, a two-bed room, one employee.
/// Returns (room id, employee id).
fn seed(gw: &SqliteGateway) -> (i64, i64) {
    let city = post(gw, "/api/city", json!({"CityName": "Tromsø"}));
    let camp = post(
        gw,
        "/api/camp",
        json!({"CampusName": "Fjord Camp", "City": city["CityID"]}),
    );
    let building = post(
        gw,
        "/api/building",
        json!({"CampusID": camp["CampusID"], "NumberOfFloors": 3}),
    );
    let room_type = post(gw, "/api/roomtype", json!({"RoomType": "Double"}));
    let room = post(
        gw,
        "/api/room",
        json!({
            "BuildingID": building["BuildingID"], "RoomNumber": 101,
            "RoomType": room_type["RoomTypeID"], "FloorNumber": 1,
            "Capacity": 2, "FreeBeds": 2
        }),
    );
    let nationality = post(gw, "/api/nationality", json!({"Nationality": "Norwegian"}));
    let employee = post(
        gw,
        "/api/employee",
        json!({
            "FirstName": "Kari", "LastName": "Nordmann",
            "NationalityID": nationality["NationalityID"],
            "PhoneNumber": "+47 900 00 000", "Email": "kari@example.com",
            "JobTitle": "Welder", "Salary": 50000
        }),
    );
    (
        room["RoomID"].as_i64().unwrap(),
        employee["EmployeeID"].as_i64().unwrap(),
    )
}

#[test]
fn booking_takes_a_bed_and_cancelling_returns_it() {
    let gw = sqlite_gateway();
    let (room_id, employee_id) = seed(&gw);
    assert_eq!(room(&gw, room_id)["FreeBeds"], 2);

    let booking = post(
        &gw,
        "/api/booking",
        json!({
            "RoomID": room_id, "EmployeeID": employee_id,
            "StartDate": "2030-06-01T00:00:00.000Z", "EndDate": "2030-06-30"
        }),
    );
    assert_eq!(booking["StartDate"], "2030-06-01");
    assert_eq!(booking["Active"], true);
    assert_eq!(booking["Finished"], false);
    assert_eq!(room(&gw, room_id)["FreeBeds"], 1);

    post(&gw, "/api/booking/cancel", json!({"BookingID": booking["BookingID"]}));
    assert_eq!(room(&gw, room_id)["FreeBeds"], 2);
}

#[test]
fn overlapping_booking_for_the_same_employee_is_refused() {
    let gw = sqlite_gateway();
    let (room_id, employee_id) = seed(&gw);
    let body = json!({
        "RoomID": room_id, "EmployeeID": employee_id,
        "StartDate": "2030-06-01", "EndDate": "2030-06-30"
    });
    post(&gw, "/api/booking", body.clone());

    let resp = handle(json_request("POST", "/api/booking", body), &gw).expect("Handler failed");

    assert_eq!(resp.status(), 500);
    let body = read_json(resp);
    assert_eq!(body["error"], "Failed to create booking");
    assert!(body["details"]
        .as_str()
        .unwrap()
        .contains("Employee already has a booking in this period"));
    assert_eq!(room(&gw, room_id)["FreeBeds"], 1);
}

#[test]
fn discount_applies_while_housed() {
    let gw = sqlite_gateway();
    let (room_id, employee_id) = seed(&gw);

    let before = post(&gw, "/api/employee/discount", json!({"EmployeeID": employee_id}));
    assert_eq!(before["Discount"].as_f64(), Some(0.0));

    post(
        &gw,
        "/api/booking",
        json!({
            "RoomID": room_id, "EmployeeID": employee_id,
            "StartDate": "2030-06-01", "EndDate": "2030-06-30"
        }),
    );

    let all = post(&gw, "/api/employee/discounts", json!({}));
    let housed = &all.as_array().unwrap()[0];
    assert_eq!(housed["Discount"].as_f64(), Some(5000.0));
    assert_eq!(housed["NetSalary"].as_f64(), Some(45000.0));
}

#[test]
fn kicking_an_employee_finishes_the_booking() {
    let gw = sqlite_gateway();
    let (room_id, employee_id) = seed(&gw);
    post(
        &gw,
        "/api/booking",
        json!({
            "RoomID": room_id, "EmployeeID": employee_id,
            "StartDate": "2030-06-01", "EndDate": "2030-06-30"
        }),
    );

    let kicked = post(
        &gw,
        "/api/booking/kick",
        json!({"EmployeeID": employee_id, "RoomID": room_id}),
    );
    assert_eq!(kicked["Active"], false);
    assert_eq!(kicked["Finished"], true);
    assert_eq!(room(&gw, room_id)["FreeBeds"], 2);

    let active = read_json(handle(get("/api/booking/active"), &gw).expect("Handler failed"));
    assert_eq!(active, json!([]));
}

#[test]
fn resizing_a_room_keeps_occupied_beds() {
    let gw = sqlite_gateway();
    let (room_id, employee_id) = seed(&gw);
    post(
        &gw,
        "/api/booking",
        json!({
            "RoomID": room_id, "EmployeeID": employee_id,
            "StartDate": "2030-06-01", "EndDate": "2030-06-30"
        }),
    );

    let resp = handle(
        json_request("PUT", "/api/room/beds", json!({"RoomID": room_id, "Capacity": 4})),
        &gw,
    )
    .expect("Handler failed");
    let resized = read_json(resp);
    assert_eq!(resized["Capacity"], 4);
    assert_eq!(resized["FreeBeds"], 3);
}

#[test]
fn a_room_found_by_the_availability_search_can_be_booked() {
    let gw = sqlite_gateway();
    let (room_id, employee_id) = seed(&gw);

    let available = read_json(
        handle(
            get("/api/booking/available-rooms?proposedStartDate=2030-08-01&proposedEndDate=2030-08-10"),
            &gw,
        )
        .expect("Handler failed"),
    );
    assert_eq!(available[0]["RoomID"], room_id);
    assert_eq!(available[0]["AvailableBeds"], 2);

    book(&gw, room_id, employee_id, "2030-08-01", "2030-08-10");
    let available = read_json(
        handle(
            get("/api/booking/available-rooms?proposedStartDate=2030-08-01&proposedEndDate=2030-08-10"),
            &gw,
        )
        .expect("Handler failed"),
    );
    assert_eq!(available[0]["AvailableBeds"], 1);
}

#[test]
fn a_full_room_is_not_offered_for_any_period() {
    let gw = sqlite_gateway();
    let (room_id, employee_id) = seed(&gw);
    let colleague = hire(&gw, "Sven");
    book(&gw, room_id, employee_id, "2030-06-01", "2030-06-30");
    book(&gw, room_id, colleague, "2030-06-01", "2030-06-30");

    let august = read_json(
        handle(
            get("/api/booking/available-rooms?proposedStartDate=2030-08-01&proposedEndDate=2030-08-10"),
            &gw,
        )
        .expect("Handler failed"),
    );
    assert_eq!(august, json!([]));
}

#[test]
fn room_cannot_shrink_below_its_occupied_beds() {
    let gw = sqlite_gateway();
    let (room_id, employee_id) = seed(&gw);
    let colleague = hire(&gw, "Sven");
    let first = book(&gw, room_id, employee_id, "2030-06-01", "2030-06-30");
    let second = book(&gw, room_id, colleague, "2030-06-01", "2030-06-30");

    let (status, body) = put(&gw, "/api/room", json!({"RoomID": room_id, "Capacity": 1}));
    assert_eq!(status, 500);
    assert!(body["details"]
        .as_str()
        .unwrap()
        .contains("Capacity is below the number of occupied beds"));

    let (status, body) = put(&gw, "/api/room", json!({"RoomID": room_id, "FreeBeds": 1}));
    assert_eq!(status, 500);
    assert!(body["details"]
        .as_str()
        .unwrap()
        .contains("Free beds cannot exceed the beds not taken by active bookings"));

    post(&gw, "/api/booking/cancel", json!({"BookingID": first["BookingID"]}));
    post(&gw, "/api/booking/cancel", json!({"BookingID": second["BookingID"]}));
    assert_eq!(room(&gw, room_id)["FreeBeds"], 2);
}

#[test]
fn growing_a_room_frees_the_new_beds() {
    let gw = sqlite_gateway();
    let (room_id, employee_id) = seed(&gw);
    book(&gw, room_id, employee_id, "2030-06-01", "2030-06-30");

    let (status, body) = put(&gw, "/api/room", json!({"RoomID": room_id, "Capacity": 3}));
    assert_eq!(status, 200, "{body}");
    assert_eq!(body["Capacity"], 3);
    assert_eq!(body["FreeBeds"], 2);
}

#[test]
fn same_day_handover_counts_as_overlap() {
    let gw = sqlite_gateway();
    let (room_id, employee_id) = seed(&gw);
    book(&gw, room_id, employee_id, "2030-06-01", "2030-06-30");

    let resp = handle(
        json_request(
            "POST",
            "/api/booking",
            json!({"RoomID": room_id, "EmployeeID": employee_id,
                   "StartDate": "2030-06-30", "EndDate": "2030-07-10"}),
        ),
        &gw,
    )
    .expect("Handler failed");
    assert_eq!(resp.status(), 500);
    assert!(read_json(resp)["details"]
        .as_str()
        .unwrap()
        .contains("Employee already has a booking in this period"));
}

#[test]
fn moving_a_booking_onto_another_of_the_same_employee_is_refused() {
    let gw = sqlite_gateway();
    let (room_id, employee_id) = seed(&gw);
    book(&gw, room_id, employee_id, "2030-06-01", "2030-06-30");
    let later = book(&gw, room_id, employee_id, "2030-08-01", "2030-08-31");

    let (status, body) = put(
        &gw,
        "/api/booking",
        json!({"BookingID": later["BookingID"], "StartDate": "2030-06-15"}),
    );
    assert_eq!(status, 500);
    assert_eq!(body["error"], "Failed to update booking");
    assert!(body["details"]
        .as_str()
        .unwrap()
        .contains("Employee already has a booking in this period"));

    let (status, body) = put(
        &gw,
        "/api/booking",
        json!({"BookingID": later["BookingID"], "EndDate": "2030-09-15"}),
    );
    assert_eq!(status, 200, "{body}");
    assert_eq!(body["EndDate"], "2030-09-15");
}

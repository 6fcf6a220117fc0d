// src/domain/entity.rs

/// How a payload field is validated, coerced and rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Identifier of another entity, named by its route. Rendered as a selector.
    Ref(&'static str),
    /// Positive integer.
    Int,
    /// Non-negative integer; zero is a real value, not "missing".
    Count,
    Text,
    /// Positive decimal.
    Decimal,
    /// Calendar day, normalized to `YYYY-MM-DD`.
    Date,
}

#[derive(Debug)]
pub struct Field {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
}

#[derive(Debug)]
pub struct Procedures {
    pub list: &'static str,
    pub by_id: &'static str,
    pub create: &'static str,
    pub update: &'static str,
    pub delete: &'static str,
}

/// Everything the generic handlers and pages need to know about one entity.
#[derive(Debug)]
pub struct EntityKind {
    /// Path segment under `/` and `/api/`.
    pub route: &'static str,
    /// Capitalised singular, used in confirmations ("Booking deleted successfully").
    pub name: &'static str,
    pub singular: &'static str,
    pub plural: &'static str,
    pub title: &'static str,
    pub id_field: &'static str,
    pub fields: &'static [Field],
    pub procedures: Procedures,
    /// Merged into the echoed payload when a create returns no row.
    pub create_defaults: &'static [(&'static str, bool)],
    /// (column, header) pairs shown on the list page.
    pub columns: &'static [(&'static str, &'static str)],
    /// Columns joined to label this entity inside selectors.
    pub label_fields: &'static [&'static str],
}

const fn field(name: &'static str, label: &'static str, kind: FieldKind) -> Field {
    Field { name, label, kind }
}

pub static CITY: EntityKind = EntityKind {
    route: "city",
    name: "City",
    singular: "city",
    plural: "cities",
    title: "Cities",
    id_field: "CityID",
    fields: &[field("CityName", "City Name", FieldKind::Text)],
    procedures: Procedures {
        list: "Cities_Read_All",
        by_id: "Cities_Read_ById",
        create: "Cities_Create",
        update: "Cities_Update",
        delete: "Cities_Delete",
    },
    create_defaults: &[],
    columns: &[("CityID", "ID"), ("CityName", "City")],
    label_fields: &["CityName"],
};

pub static CAMP: EntityKind = EntityKind {
    route: "camp",
    name: "Camp",
    singular: "camp",
    plural: "camps",
    title: "Camps",
    id_field: "CampusID",
    fields: &[
        field("CampusName", "Campus Name", FieldKind::Text),
        field("City", "City", FieldKind::Ref("city")),
    ],
    procedures: Procedures {
        list: "Campus_Read_All",
        by_id: "Campus_Read_ById",
        create: "Campus_Create",
        update: "Campus_Update",
        delete: "Campus_Delete",
    },
    create_defaults: &[],
    columns: &[
        ("CampusID", "ID"),
        ("CampusName", "Camp"),
        ("CityName", "City"),
    ],
    label_fields: &["CampusName"],
};

pub static BUILDING: EntityKind = EntityKind {
    route: "building",
    name: "Building",
    singular: "building",
    plural: "buildings",
    title: "Buildings",
    id_field: "BuildingID",
    fields: &[
        field("CampusID", "Camp", FieldKind::Ref("camp")),
        field("NumberOfFloors", "Number of Floors", FieldKind::Int),
    ],
    procedures: Procedures {
        list: "Building_Read_All",
        by_id: "Building_Read_ById",
        create: "Building_Create",
        update: "Building_Update",
        delete: "Building_Delete",
    },
    create_defaults: &[],
    columns: &[
        ("BuildingID", "ID"),
        ("CampusName", "Camp"),
        ("NumberOfFloors", "Floors"),
    ],
    label_fields: &["BuildingID", "CampusName"],
};

pub static ROOM_TYPE: EntityKind = EntityKind {
    route: "roomtype",
    name: "Room type",
    singular: "room type",
    plural: "room types",
    title: "Room Types",
    id_field: "RoomTypeID",
    fields: &[field("RoomType", "Room Type", FieldKind::Text)],
    procedures: Procedures {
        list: "RoomTypes_Read_All",
        by_id: "RoomTypes_Read_ById",
        create: "RoomTypes_Create",
        update: "RoomTypes_Update",
        delete: "RoomTypes_Delete",
    },
    create_defaults: &[],
    columns: &[("RoomTypeID", "ID"), ("RoomType", "Room Type")],
    label_fields: &["RoomType"],
};

pub static ROOM: EntityKind = EntityKind {
    route: "room",
    name: "Room",
    singular: "room",
    plural: "rooms",
    title: "Rooms",
    id_field: "RoomID",
    fields: &[
        field("BuildingID", "Building", FieldKind::Ref("building")),
        field("RoomNumber", "Room Number", FieldKind::Int),
        field("RoomType", "Room Type", FieldKind::Ref("roomtype")),
        field("FloorNumber", "Floor", FieldKind::Int),
        field("Capacity", "Capacity", FieldKind::Int),
        field("FreeBeds", "Free Beds", FieldKind::Count),
    ],
    procedures: Procedures {
        list: "Room_Read_All",
        by_id: "Room_Read_ById",
        create: "Room_Create",
        update: "Room_Update",
        delete: "Room_Delete",
    },
    create_defaults: &[],
    columns: &[
        ("RoomID", "ID"),
        ("BuildingID", "Building"),
        ("RoomNumber", "Room"),
        ("RoomTypeLabel", "Type"),
        ("FloorNumber", "Floor"),
        ("Capacity", "Capacity"),
        ("FreeBeds", "Free Beds"),
    ],
    label_fields: &["RoomNumber"],
};

pub static NATIONALITY: EntityKind = EntityKind {
    route: "nationality",
    name: "Nationality",
    singular: "nationality",
    plural: "nationalities",
    title: "Nationalities",
    id_field: "NationalityID",
    fields: &[field("Nationality", "Nationality", FieldKind::Text)],
    procedures: Procedures {
        list: "Nationalities_Read_All",
        by_id: "Nationalities_Read_ById",
        create: "Nationalities_Create",
        update: "Nationalities_Update",
        delete: "Nationalities_Delete",
    },
    create_defaults: &[],
    columns: &[("NationalityID", "ID"), ("Nationality", "Nationality")],
    label_fields: &["Nationality"],
};

pub static EMPLOYEE: EntityKind = EntityKind {
    route: "employee",
    name: "Employee",
    singular: "employee",
    plural: "employees",
    title: "Employees",
    id_field: "EmployeeID",
    fields: &[
        field("FirstName", "First Name", FieldKind::Text),
        field("LastName", "Last Name", FieldKind::Text),
        field("NationalityID", "Nationality", FieldKind::Ref("nationality")),
        field("PhoneNumber", "Phone", FieldKind::Text),
        field("Email", "Email", FieldKind::Text),
        field("JobTitle", "Job Title", FieldKind::Text),
        field("Salary", "Salary", FieldKind::Decimal),
    ],
    procedures: Procedures {
        list: "Employee_Read_All",
        by_id: "Employee_Read_ById",
        create: "Employee_Create",
        update: "Employee_Update",
        delete: "Employee_Delete",
    },
    create_defaults: &[],
    columns: &[
        ("EmployeeID", "ID"),
        ("FirstName", "First Name"),
        ("LastName", "Last Name"),
        ("Nationality", "Nationality"),
        ("PhoneNumber", "Phone"),
        ("Email", "Email"),
        ("JobTitle", "Job Title"),
        ("Salary", "Salary"),
        ("Discount", "Discount"),
        ("NetSalary", "Net Salary"),
    ],
    label_fields: &["FirstName", "LastName"],
};

pub static BOOKING: EntityKind = EntityKind {
    route: "booking",
    name: "Booking",
    singular: "booking",
    plural: "bookings",
    title: "Bookings",
    id_field: "BookingID",
    fields: &[
        field("RoomID", "Room", FieldKind::Ref("room")),
        field("EmployeeID", "Employee", FieldKind::Ref("employee")),
        field("StartDate", "Start Date", FieldKind::Date),
        field("EndDate", "End Date", FieldKind::Date),
    ],
    procedures: Procedures {
        list: "Booking_Read_All",
        by_id: "Booking_Read_ById",
        create: "Booking_Create",
        update: "Booking_Update",
        delete: "Booking_Delete",
    },
    create_defaults: &[("Active", true), ("Finished", false)],
    columns: &[
        ("BookingID", "ID"),
        ("RoomNumber", "Room"),
        ("FirstName", "First Name"),
        ("LastName", "Last Name"),
        ("StartDate", "Start"),
        ("EndDate", "End"),
    ],
    label_fields: &["BookingID"],
};

/// Navigation order.
pub static ENTITIES: [&EntityKind; 8] = [
    &CAMP,
    &BUILDING,
    &ROOM,
    &BOOKING,
    &EMPLOYEE,
    &CITY,
    &NATIONALITY,
    &ROOM_TYPE,
];

pub fn find(route: &str) -> Option<&'static EntityKind> {
    ENTITIES.iter().copied().find(|kind| kind.route == route)
}

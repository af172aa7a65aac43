use super::*;

// =============================================================
// UserRecord::decode
// =============================================================

#[test]
fn decode_accepts_full_record() {
    let record = UserRecord::decode(r#"{"email":"a@x.com","name":"A","roles":["Admin"],"role":""}"#).unwrap();
    assert_eq!(record.email, "a@x.com");
    assert_eq!(record.name, "A");
    assert_eq!(record.roles, vec!["Admin".to_owned()]);
    assert_eq!(record.role.as_deref(), Some(""));
}

#[test]
fn decode_accepts_display_name_alias() {
    let record = UserRecord::decode(r#"{"email":"b@x.com","displayName":"Bee"}"#).unwrap();
    assert_eq!(record.name, "Bee");
    assert!(record.roles.is_empty());
    assert!(record.role.is_none());
}

#[test]
fn decode_treats_null_fields_as_empty() {
    let record = UserRecord::decode(r#"{"email":"c@x.com","name":null,"roles":null}"#).unwrap();
    assert_eq!(record.name, "");
    assert!(record.roles.is_empty());
}

#[test]
fn decode_rejects_malformed_json() {
    assert!(matches!(UserRecord::decode("{not json"), Err(RecordError::Malformed(_))));
}

#[test]
fn decode_rejects_wrong_shape() {
    assert!(matches!(UserRecord::decode(r#"{"email":"a@x.com","roles":"Admin"}"#), Err(RecordError::Malformed(_))));
    assert!(matches!(UserRecord::decode("[1,2,3]"), Err(RecordError::Malformed(_))));
}

#[test]
fn decode_rejects_record_without_identity() {
    assert!(matches!(UserRecord::decode(r#"{"roles":["Admin"]}"#), Err(RecordError::MissingIdentity)));
    assert!(matches!(UserRecord::decode(r#"{"email":"  ","name":""}"#), Err(RecordError::MissingIdentity)));
}

#[test]
fn encode_omits_absent_role() {
    let record = UserRecord { email: "a@x.com".to_owned(), name: "A".to_owned(), roles: vec![], role: None };
    let raw = record.encode().unwrap();
    assert!(!raw.contains("\"role\""));
    assert_eq!(UserRecord::decode(&raw).unwrap(), record);
}

// =============================================================
// Admin claim
// =============================================================

#[test]
fn admin_claim_from_roles_collection() {
    let record = UserRecord { roles: vec!["Customer".to_owned(), "Admin".to_owned()], ..UserRecord::default() };
    assert!(record.has_admin_claim());
}

#[test]
fn admin_claim_from_singular_role() {
    let record = UserRecord { role: Some("Admin".to_owned()), ..UserRecord::default() };
    assert!(record.has_admin_claim());
}

#[test]
fn admin_claim_is_case_sensitive() {
    let record = UserRecord { roles: vec!["admin".to_owned()], role: Some("ADMIN".to_owned()), ..UserRecord::default() };
    assert!(!record.has_admin_claim());
}

// =============================================================
// Session
// =============================================================

#[test]
fn display_name_falls_back_to_email() {
    let session = Session::new(UserRecord { email: "a@x.com".to_owned(), ..UserRecord::default() }, "t");
    assert_eq!(session.display_name(), "a@x.com");
}

#[test]
fn roles_merges_collection_and_singular() {
    let user = UserRecord {
        email: "a@x.com".to_owned(),
        roles: vec!["Customer".to_owned(), "Customer".to_owned()],
        role: Some("Admin".to_owned()),
        ..UserRecord::default()
    };
    let session = Session::new(user, "tok");
    let roles: Vec<&str> = session.roles().into_iter().collect();
    assert_eq!(roles, vec!["Admin", "Customer"]);
    assert!(session.has_admin_claim());
    assert_eq!(session.token(), "tok");
}

use super::*;

// =============================================================
// AdminVerdict
// =============================================================

#[test]
fn success_statuses_grant_admin() {
    for status in [200, 201, 204, 299] {
        assert_eq!(AdminVerdict::from_status(status), AdminVerdict::Granted, "status {status}");
    }
}

#[test]
fn auth_statuses_deny_admin() {
    assert_eq!(AdminVerdict::from_status(401), AdminVerdict::Denied);
    assert_eq!(AdminVerdict::from_status(403), AdminVerdict::Denied);
}

#[test]
fn other_statuses_are_unverifiable() {
    for status in [301, 400, 404, 500, 503] {
        let verdict = AdminVerdict::from_status(status);
        assert_eq!(verdict, AdminVerdict::Unverifiable(status));
        assert!(!verdict.is_admin());
    }
}

// =============================================================
// LoginResponse::into_user_record
// =============================================================

#[test]
fn nested_user_fields_are_used() {
    let resp: LoginResponse =
        serde_json::from_str(r#"{"token":"abc","user":{"name":"A","roles":["Admin"]}}"#).unwrap();
    let record = resp.into_user_record("a@x.com");
    assert_eq!(record.email, "a@x.com");
    assert_eq!(record.name, "A");
    assert_eq!(record.roles, vec!["Admin".to_owned()]);
    assert!(record.role.is_none());
    assert!(record.has_admin_claim());
}

#[test]
fn top_level_roles_win_over_nested() {
    let resp: LoginResponse = serde_json::from_str(
        r#"{"token":"t","roles":["Customer"],"role":"Admin","user":{"roles":["Admin"],"role":"Customer"}}"#,
    )
    .unwrap();
    let record = resp.into_user_record("a@x.com");
    assert_eq!(record.roles, vec!["Customer".to_owned()]);
    assert_eq!(record.role.as_deref(), Some("Admin"));
}

#[test]
fn empty_top_level_role_falls_through() {
    let resp: LoginResponse =
        serde_json::from_str(r#"{"token":"t","role":"","user":{"role":"Admin"}}"#).unwrap();
    assert_eq!(resp.into_user_record("a@x.com").role.as_deref(), Some("Admin"));
}

#[test]
fn token_only_response_uses_email_as_name() {
    let resp: LoginResponse = serde_json::from_str(r#"{"token":"t"}"#).unwrap();
    let record = resp.into_user_record("a@x.com");
    assert_eq!(record.name, "a@x.com");
    assert!(record.roles.is_empty());
    assert!(!record.has_admin_claim());
}

#[test]
fn response_without_token_fails_to_decode() {
    assert!(serde_json::from_str::<LoginResponse>(r#"{"user":{"name":"A"}}"#).is_err());
}

// =============================================================
// Request bodies
// =============================================================

#[test]
fn registration_serializes_camel_case() {
    let reg = Registration {
        name: "A".to_owned(),
        email: "a@x.com".to_owned(),
        password: "pw".to_owned(),
        confirm_password: "pw".to_owned(),
    };
    let json = serde_json::to_value(&reg).unwrap();
    assert_eq!(json["confirmPassword"], "pw");
    assert!(reg.passwords_match());
}

#[test]
fn debug_output_hides_passwords() {
    let creds = Credentials::new("a@x.com", "hunter2");
    assert!(!format!("{creds:?}").contains("hunter2"));

    let reg = Registration {
        name: "A".to_owned(),
        email: "a@x.com".to_owned(),
        password: "hunter2".to_owned(),
        confirm_password: "hunter3".to_owned(),
    };
    assert!(!format!("{reg:?}").contains("hunter"));
    assert!(!reg.passwords_match());
}

use heritage_core::{MemberRecord, MemberStatus, MemberValidationError};
use uuid::Uuid;

#[test]
fn new_member_sets_defaults() {
    let member = MemberRecord::new("John", "Fomuso");

    assert!(!member.uuid.is_nil());
    assert_eq!(member.status, MemberStatus::Pending);
    assert_eq!(member.salutation, None);
    assert_eq!(member.father_name, None);
    assert_eq!(member.mother_name, None);
    assert_eq!(member.spouse_name, None);
    assert_eq!(member.submitted_at, None);
    assert_eq!(member.approved_at, None);
    assert!(!member.is_approved());
}

#[test]
fn with_id_rejects_nil_uuid() {
    let err = MemberRecord::with_id(Uuid::nil(), "John", "Fomuso").unwrap_err();
    assert_eq!(err, MemberValidationError::NilUuid);
}

#[test]
fn member_serialization_uses_expected_wire_fields() {
    let member_id = Uuid::parse_str("11111111-2222-4333-8444-555555555555").unwrap();
    let mut member = MemberRecord::with_id(member_id, "John", "Fomuso").unwrap();
    member.salutation = Some("Mr".to_string());
    member.nickname = Some("JJ".to_string());
    member.father_name = Some("Paul Fomuso".to_string());
    member.mother_name = Some("Ada Fomuso".to_string());
    member.spouse_name = Some("Mary Lane".to_string());
    member.relation = Some("Son of Paul Fomuso".to_string());
    member.bio = Some("Farmer and storyteller.".to_string());
    member.status = MemberStatus::Approved;
    member.submitted_at = Some(1_700_000_000_000);
    member.approved_at = Some(1_700_000_360_000);

    let json = serde_json::to_value(&member).unwrap();
    assert_eq!(json["uuid"], member_id.to_string());
    assert_eq!(json["firstName"], "John");
    assert_eq!(json["lastName"], "Fomuso");
    assert_eq!(json["fatherName"], "Paul Fomuso");
    assert_eq!(json["motherName"], "Ada Fomuso");
    assert_eq!(json["spouseName"], "Mary Lane");
    assert_eq!(json["status"], "approved");
    assert_eq!(json["submittedAt"], 1_700_000_000_000_i64);
    assert_eq!(json["approvedAt"], 1_700_000_360_000_i64);

    let decoded: MemberRecord = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, member);
}

#[test]
fn full_name_is_the_join_key_rendering() {
    let mut member = MemberRecord::new("Ada", "Fomuso");
    member.salutation = Some("Ma".to_string());
    assert_eq!(member.full_name(), "Ma Ada Fomuso");
    assert_eq!(member.person_key().as_str(), "Ma Ada Fomuso");
}

#[test]
fn validate_enforces_photo_shape() {
    let mut member = MemberRecord::new("John", "Fomuso");
    member.photo = Some("data:image/jpeg;base64,/9j/4AAQSkZJRg==".to_string());
    member.validate().unwrap();

    member.photo = Some("data:text/plain;base64,aGVsbG8=".to_string());
    assert_eq!(
        member.validate().unwrap_err(),
        MemberValidationError::InvalidPhotoDataUrl
    );
}

//! The two shipped flows. These mirror the YAML files under
//! `enrollment/metadata/` so the engine works without any filesystem access.

use super::definition::{
    ContactFields, DocumentSlot, FieldKind, FieldSpec, FlowDefinition, StepDefinition,
};

fn scalar(key: &str) -> FieldSpec {
    FieldSpec::new(key, FieldKind::Scalar)
}

fn selection(key: &str) -> FieldSpec {
    FieldSpec::new(key, FieldKind::Selection)
}

fn flag(key: &str) -> FieldSpec {
    FieldSpec::new(key, FieldKind::Flag)
}

/// Institution onboarding: eight steps, contact verification gates step 1.
pub fn institution() -> FlowDefinition {
    FlowDefinition {
        id: "institution-onboarding".into(),
        title: "Institution Registration".into(),
        steps: vec![
            StepDefinition {
                id: 1,
                title: "Institution Identity".into(),
                description: "Basic details and verified contact information".into(),
                required_fields: vec![
                    scalar("identity.name"),
                    scalar("identity.registration_number"),
                    scalar("identity.phone"),
                    scalar("identity.email"),
                ],
                document_slots: vec![],
                verification_gate: true,
            },
            StepDefinition {
                id: 2,
                title: "Address".into(),
                description: "Campus location and postal details".into(),
                required_fields: vec![
                    scalar("address.line1"),
                    scalar("address.city"),
                    scalar("address.state"),
                    scalar("address.postal_code"),
                ],
                document_slots: vec![],
                verification_gate: false,
            },
            StepDefinition {
                id: 3,
                title: "Accreditation".into(),
                description: "Board affiliation and accreditation evidence".into(),
                required_fields: vec![scalar("accreditation.board"), scalar("accreditation.since")],
                document_slots: vec![
                    DocumentSlot::required(
                        "accreditation.certificate",
                        "Accreditation certificate",
                    ),
                    DocumentSlot::optional("accreditation.affiliation_letter", "Affiliation letter"),
                ],
                verification_gate: false,
            },
            StepDefinition {
                id: 4,
                title: "Academic Profile".into(),
                description: "Streams, grade range and languages of instruction".into(),
                required_fields: vec![
                    selection("academic.streams"),
                    selection("academic.languages"),
                    scalar("academic.grade_range"),
                ],
                document_slots: vec![],
                verification_gate: false,
            },
            StepDefinition {
                id: 5,
                title: "Facilities".into(),
                description: "Campus facilities offered to students".into(),
                required_fields: vec![selection("facilities.available")],
                document_slots: vec![],
                verification_gate: false,
            },
            StepDefinition {
                id: 6,
                title: "Administration".into(),
                description: "Principal and administrative contacts".into(),
                required_fields: vec![
                    scalar("admin.principal_name"),
                    scalar("admin.principal_email"),
                ],
                document_slots: vec![],
                verification_gate: false,
            },
            StepDefinition {
                id: 7,
                title: "Banking".into(),
                description: "Fee collection account details".into(),
                required_fields: vec![
                    scalar("banking.account_number"),
                    scalar("banking.ifsc"),
                    scalar("banking.account_holder"),
                ],
                document_slots: vec![DocumentSlot::required(
                    "banking.cancelled_cheque",
                    "Cancelled cheque",
                )],
                verification_gate: false,
            },
            StepDefinition {
                id: 8,
                title: "Review & Consent".into(),
                description: "Confirm the submitted information and accept the terms".into(),
                required_fields: vec![
                    flag("consent.terms"),
                    flag("consent.data_accuracy"),
                    flag("consent.verification"),
                ],
                document_slots: vec![],
                verification_gate: false,
            },
        ],
        contact: ContactFields {
            phone_key: "identity.phone".into(),
            email_key: "identity.email".into(),
        },
        required_consents: vec![
            "consent.terms".into(),
            "consent.data_accuracy".into(),
            "consent.verification".into(),
        ],
        submit_destination: "institution/registration-complete".into(),
        exit_destination: "institution/dashboard".into(),
    }
}

/// Teacher onboarding: six steps, same gate on the contact step.
pub fn teacher() -> FlowDefinition {
    FlowDefinition {
        id: "teacher-onboarding".into(),
        title: "Teacher Registration".into(),
        steps: vec![
            StepDefinition {
                id: 1,
                title: "Personal Details".into(),
                description: "Name and verified contact information".into(),
                required_fields: vec![
                    scalar("identity.full_name"),
                    scalar("identity.phone"),
                    scalar("identity.email"),
                ],
                document_slots: vec![],
                verification_gate: true,
            },
            StepDefinition {
                id: 2,
                title: "Qualifications".into(),
                description: "Degrees held and subjects taught".into(),
                required_fields: vec![
                    scalar("qualification.highest_degree"),
                    selection("qualification.subjects"),
                ],
                document_slots: vec![DocumentSlot::required(
                    "qualification.degree_certificate",
                    "Degree certificate",
                )],
                verification_gate: false,
            },
            StepDefinition {
                id: 3,
                title: "Experience".into(),
                description: "Teaching history".into(),
                required_fields: vec![
                    scalar("experience.years"),
                    scalar("experience.last_institution"),
                ],
                document_slots: vec![DocumentSlot::optional(
                    "experience.reference_letter",
                    "Reference letter",
                )],
                verification_gate: false,
            },
            StepDefinition {
                id: 4,
                title: "Documents".into(),
                description: "Identity proof and photograph".into(),
                required_fields: vec![],
                document_slots: vec![
                    DocumentSlot::required("documents.id_proof", "Government ID proof"),
                    DocumentSlot::required("documents.photo", "Passport photograph"),
                ],
                verification_gate: false,
            },
            StepDefinition {
                id: 5,
                title: "Preferences".into(),
                description: "Grade levels and mediums of instruction".into(),
                required_fields: vec![
                    selection("preferences.grade_levels"),
                    selection("preferences.languages"),
                ],
                document_slots: vec![],
                verification_gate: false,
            },
            StepDefinition {
                id: 6,
                title: "Review & Consent".into(),
                description: "Confirm the application and accept the terms".into(),
                required_fields: vec![flag("consent.terms"), flag("consent.background_check")],
                document_slots: vec![],
                verification_gate: false,
            },
        ],
        contact: ContactFields {
            phone_key: "identity.phone".into(),
            email_key: "identity.email".into(),
        },
        required_consents: vec!["consent.terms".into(), "consent.background_check".into()],
        submit_destination: "teacher/application-complete".into(),
        exit_destination: "teacher/dashboard".into(),
    }
}

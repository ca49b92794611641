use crate::engine::WizardEngine;
use crate::errors::WizardError;
use crate::flow::{self, FlowDefinition};
use crate::ports::{NavigationDispatcher, NotificationKind, NotificationSink};
use crate::state::{ArtifactRef, FieldValue, StepStatus};
use crate::verify::FixedCodeVerifier;
use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;

#[derive(Default)]
struct RecordingNotifier {
    log: Rc<RefCell<Vec<(NotificationKind, String)>>>,
}

impl NotificationSink for RecordingNotifier {
    fn notify(&mut self, kind: NotificationKind, message: &str) {
        self.log.borrow_mut().push((kind, message.to_string()));
    }
}

#[derive(Default)]
struct RecordingNavigator {
    destinations: Rc<RefCell<Vec<String>>>,
}

impl NavigationDispatcher for RecordingNavigator {
    fn navigate(&mut self, destination_id: &str) {
        self.destinations
            .borrow_mut()
            .push(destination_id.to_string());
    }
}

struct Harness {
    engine: WizardEngine,
    notifications: Rc<RefCell<Vec<(NotificationKind, String)>>>,
    destinations: Rc<RefCell<Vec<String>>>,
}

fn harness(flow: FlowDefinition) -> Harness {
    let notifications = Rc::new(RefCell::new(vec![]));
    let destinations = Rc::new(RefCell::new(vec![]));
    let engine = WizardEngine::with_ports(
        flow,
        Box::new(FixedCodeVerifier::default()),
        Box::new(RecordingNotifier {
            log: notifications.clone(),
        }),
        Box::new(RecordingNavigator {
            destinations: destinations.clone(),
        }),
    )
    .expect("flows under test are valid");
    Harness {
        engine,
        notifications,
        destinations,
    }
}

fn fill_contact(engine: &mut WizardEngine) {
    engine.set_field("identity.phone", FieldValue::scalar("+91-98765-43210"));
    engine.set_field("identity.email", FieldValue::scalar("admin@school.example"));
}

fn verify_contact(engine: &mut WizardEngine) {
    fill_contact(engine);
    engine.request_verification_code().unwrap();
    engine.submit_verification_code("123456").unwrap();
}

#[test]
fn fresh_state_starts_at_step_one() {
    let engine = WizardEngine::new(flow::institution()).unwrap();
    let state = engine.state();
    assert_eq!(state.current_step, 1);
    assert!(state.fields.is_empty());
    assert!(state.uploads.is_empty());
    assert!(!state.verification.otp_requested);
    assert!(!state.verification.otp_verified);
}

#[test]
fn builtin_flows_validate() {
    let institution = flow::institution();
    institution.validate().unwrap();
    assert_eq!(institution.total_steps(), 8);

    let teacher = flow::teacher();
    teacher.validate().unwrap();
    assert_eq!(teacher.total_steps(), 6);
}

#[test]
fn flow_validation_rejects_non_contiguous_ids() {
    let mut flow = flow::teacher();
    flow.steps[2].id = 7;
    assert!(flow.validate().is_err());
}

#[test]
fn engine_rejects_flow_with_no_steps() {
    let mut flow = flow::institution();
    flow.steps.clear();
    assert!(WizardEngine::new(flow).is_err());
}

#[test]
fn engine_rejects_flow_with_bad_step_ids() {
    let mut flow = flow::teacher();
    flow.steps[0].id = 3;
    assert!(WizardEngine::new(flow).is_err());
}

#[test]
fn shipped_metadata_matches_builtin_flows() {
    let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("metadata");
    let flows = flow::load_from_dir(&dir).unwrap();
    assert_eq!(flows.len(), 2);
    assert_eq!(flows[0], flow::institution());
    assert_eq!(flows[1], flow::teacher());
}

#[test]
fn advance_from_gated_step_without_verification_fails() {
    let mut h = harness(flow::institution());
    let err = h.engine.advance().unwrap_err();
    assert_eq!(err, WizardError::GateNotSatisfied(1));
    assert_eq!(h.engine.state().current_step, 1);
}

#[test]
fn advance_from_non_gated_step_moves_exactly_one() {
    let mut h = harness(flow::institution());
    verify_contact(&mut h.engine);
    h.engine.advance().unwrap();
    assert_eq!(h.engine.state().current_step, 2);
    h.engine.advance().unwrap();
    assert_eq!(h.engine.state().current_step, 3);
}

#[test]
fn advance_clamps_at_last_step() {
    let mut h = harness(flow::teacher());
    verify_contact(&mut h.engine);
    for _ in 0..20 {
        h.engine.advance().unwrap();
    }
    assert_eq!(h.engine.state().current_step, 6);
}

#[test]
fn retreat_clamps_at_first_step() {
    let mut h = harness(flow::institution());
    h.engine.retreat();
    assert_eq!(h.engine.state().current_step, 1);

    verify_contact(&mut h.engine);
    h.engine.advance().unwrap();
    h.engine.advance().unwrap();
    h.engine.retreat();
    assert_eq!(h.engine.state().current_step, 2);
}

#[test]
fn request_code_requires_both_contact_fields() {
    let mut h = harness(flow::institution());
    assert!(matches!(
        h.engine.request_verification_code(),
        Err(WizardError::MissingContactInfo(_))
    ));

    h.engine
        .set_field("identity.phone", FieldValue::scalar("+91-98765-43210"));
    assert!(matches!(
        h.engine.request_verification_code(),
        Err(WizardError::MissingContactInfo(_))
    ));

    h.engine
        .set_field("identity.email", FieldValue::scalar("admin@school.example"));
    h.engine.request_verification_code().unwrap();
    assert!(h.engine.state().verification.otp_requested);
    assert!(!h.engine.state().verification.otp_verified);
}

#[test]
fn code_submission_before_request_is_rejected() {
    let mut h = harness(flow::institution());
    assert_eq!(
        h.engine.submit_verification_code("123456"),
        Err(WizardError::NoCodeRequested)
    );
}

#[test]
fn wrong_code_leaves_verification_unset() {
    let mut h = harness(flow::institution());
    fill_contact(&mut h.engine);
    h.engine.request_verification_code().unwrap();

    assert_eq!(
        h.engine.submit_verification_code("000000"),
        Err(WizardError::InvalidCode)
    );
    assert!(!h.engine.state().verification.otp_verified);

    h.engine.submit_verification_code("123456").unwrap();
    assert!(h.engine.state().verification.otp_verified);
}

#[test]
fn attach_document_overwrites_prior_artifact() {
    let mut h = harness(flow::institution());
    let first = ArtifactRef::new("certificate-draft.pdf", 120_000, "application/pdf");
    let second = ArtifactRef::new("certificate-final.pdf", 140_000, "application/pdf");

    h.engine
        .attach_document("accreditation.certificate", first);
    h.engine
        .attach_document("accreditation.certificate", second.clone());

    assert_eq!(h.engine.state().uploads.len(), 1);
    assert_eq!(
        h.engine.state().uploads["accreditation.certificate"],
        second
    );
    assert_eq!(h.notifications.borrow().len(), 2);
}

#[test]
fn toggle_set_member_is_idempotent() {
    let mut h = harness(flow::teacher());
    h.engine
        .toggle_set_member("qualification.subjects", "Mathematics", true);
    h.engine
        .toggle_set_member("qualification.subjects", "Mathematics", true);
    h.engine
        .toggle_set_member("qualification.subjects", "Physics", true);

    let subjects = h.engine.state().selection("qualification.subjects").unwrap();
    assert_eq!(subjects.len(), 2);

    h.engine
        .toggle_set_member("qualification.subjects", "Physics", false);
    h.engine
        .toggle_set_member("qualification.subjects", "Physics", false);
    let subjects = h.engine.state().selection("qualification.subjects").unwrap();
    assert_eq!(subjects.len(), 1);
    assert!(subjects.contains("Mathematics"));
}

#[test]
fn can_submit_is_false_away_from_final_step() {
    let mut h = harness(flow::institution());
    for consent in h.engine.flow().required_consents.clone() {
        h.engine.set_field(consent, FieldValue::flag(true));
    }
    assert!(!h.engine.can_submit());
}

#[test]
fn can_submit_is_false_with_any_consent_missing() {
    let mut h = harness(flow::institution());
    verify_contact(&mut h.engine);
    for _ in 0..7 {
        h.engine.advance().unwrap();
    }
    assert_eq!(h.engine.state().current_step, 8);

    h.engine
        .set_field("consent.terms", FieldValue::flag(true));
    h.engine
        .set_field("consent.data_accuracy", FieldValue::flag(true));
    assert!(!h.engine.can_submit());
    assert_eq!(
        h.engine.missing_consents(),
        vec!["consent.verification".to_string()]
    );
}

#[test]
fn happy_path_submits_and_navigates_once() {
    let mut h = harness(flow::institution());
    verify_contact(&mut h.engine);
    for _ in 0..7 {
        h.engine.advance().unwrap();
    }
    for consent in h.engine.flow().required_consents.clone() {
        h.engine.set_field(consent, FieldValue::flag(true));
    }

    assert!(h.engine.can_submit());
    h.engine.submit().unwrap();

    let destinations = h.destinations.borrow();
    assert_eq!(destinations.len(), 1);
    assert_eq!(destinations[0], "institution/registration-complete");
}

#[test]
fn submit_with_missing_consent_navigates_zero_times() {
    let mut h = harness(flow::institution());
    verify_contact(&mut h.engine);
    for _ in 0..7 {
        h.engine.advance().unwrap();
    }
    h.engine
        .set_field("consent.terms", FieldValue::flag(true));
    h.engine
        .set_field("consent.data_accuracy", FieldValue::flag(true));

    let err = h.engine.submit().unwrap_err();
    assert_eq!(
        err,
        WizardError::ConsentIncomplete(vec!["consent.verification".to_string()])
    );
    assert!(h.destinations.borrow().is_empty());
}

#[test]
fn abandon_navigates_to_exit_destination() {
    let mut h = harness(flow::teacher());
    h.engine.abandon();
    let destinations = h.destinations.borrow();
    assert_eq!(destinations.as_slice(), ["teacher/dashboard"]);
}

#[test]
fn step_statuses_follow_current_position() {
    let mut h = harness(flow::teacher());
    verify_contact(&mut h.engine);
    h.engine.advance().unwrap();
    h.engine.advance().unwrap();

    let statuses = h.engine.step_statuses();
    assert_eq!(statuses[0], (1, StepStatus::Completed));
    assert_eq!(statuses[1], (2, StepStatus::Completed));
    assert_eq!(statuses[2], (3, StepStatus::Current));
    assert_eq!(statuses[3], (4, StepStatus::Pending));
    assert_eq!(statuses[5], (6, StepStatus::Pending));
}

#[test]
fn step_completeness_is_advisory_only() {
    let mut h = harness(flow::teacher());
    // Step 2 requires a degree, subjects and a certificate upload.
    assert!(!h.engine.is_step_complete(2));

    h.engine.set_field(
        "qualification.highest_degree",
        FieldValue::scalar("M.Sc. Mathematics"),
    );
    h.engine
        .toggle_set_member("qualification.subjects", "Mathematics", true);
    assert!(!h.engine.is_step_complete(2));

    h.engine.attach_document(
        "qualification.degree_certificate",
        ArtifactRef::new("degree.pdf", 90_000, "application/pdf"),
    );
    assert!(h.engine.is_step_complete(2));

    // An incomplete step never blocks forward navigation.
    verify_contact(&mut h.engine);
    h.engine.advance().unwrap();
    h.engine.advance().unwrap();
    assert_eq!(h.engine.state().current_step, 3);
    assert!(!h.engine.is_step_complete(3));
}

#[test]
fn progress_tracks_position() {
    let mut h = harness(flow::institution());
    assert_eq!(h.engine.progress_percent(), 12);
    verify_contact(&mut h.engine);
    for _ in 0..7 {
        h.engine.advance().unwrap();
    }
    assert_eq!(h.engine.progress_percent(), 100);
}

#[test]
fn unknown_field_keys_are_stored_permissively() {
    let mut h = harness(flow::institution());
    h.engine
        .set_field("scratch.note", FieldValue::scalar("call back tomorrow"));
    assert_eq!(
        h.engine.state().scalar("scratch.note"),
        Some("call back tomorrow")
    );
}

#[test]
fn flow_definition_round_trips_through_yaml() {
    let flow = flow::teacher();
    let yaml = serde_yaml::to_string(&flow).unwrap();
    let parsed: FlowDefinition = serde_yaml::from_str(&yaml).unwrap();
    parsed.validate().unwrap();
    assert_eq!(parsed, flow);
}

#[test]
fn custom_verifier_replaces_demo_code() {
    let notifications = Rc::new(RefCell::new(vec![]));
    let destinations = Rc::new(RefCell::new(vec![]));
    let mut engine = WizardEngine::with_ports(
        flow::institution(),
        Box::new(FixedCodeVerifier::new("424242")),
        Box::new(RecordingNotifier {
            log: notifications,
        }),
        Box::new(RecordingNavigator { destinations }),
    )
    .unwrap();
    fill_contact(&mut engine);
    engine.request_verification_code().unwrap();
    assert_eq!(
        engine.submit_verification_code("123456"),
        Err(WizardError::InvalidCode)
    );
    engine.submit_verification_code("424242").unwrap();
    assert!(engine.state().verification.otp_verified);
}

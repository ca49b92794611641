use enrollment::flow::{self, load_from_dir};
use enrollment::{
    ArtifactRef, FieldValue, FixedCodeVerifier, FlowDefinition, NavigationDispatcher,
    NotificationKind, NotificationSink, WizardEngine,
};
use std::path::Path;
use tracing_subscriber::EnvFilter;

struct StdoutNotifier;

impl NotificationSink for StdoutNotifier {
    fn notify(&mut self, kind: NotificationKind, message: &str) {
        let tag = match kind {
            NotificationKind::Success => "ok",
            NotificationKind::Error => "error",
        };
        println!("[{tag}] {message}");
    }
}

struct StdoutNavigator;

impl NavigationDispatcher for StdoutNavigator {
    fn navigate(&mut self, destination_id: &str) {
        println!("[navigate] -> {destination_id}");
    }
}

fn pick_flow(name: &str) -> anyhow::Result<FlowDefinition> {
    // Prefer the YAML metadata when running from the workspace root.
    let metadata = Path::new("enrollment/metadata");
    if metadata.is_dir() {
        let flows = load_from_dir(metadata)?;
        if let Some(flow) = flows.into_iter().find(|f| f.id.starts_with(name)) {
            return Ok(flow);
        }
    }
    match name {
        "teacher" => Ok(flow::teacher()),
        _ => Ok(flow::institution()),
    }
}

fn print_step_table(engine: &WizardEngine) {
    println!("-- {} --", engine.flow().title);
    for (id, status) in engine.step_statuses() {
        if let Some(step) = engine.flow().step(id) {
            println!(
                "  {id}. {:<22} {:?}{}",
                step.title,
                status,
                if engine.is_step_complete(id) { "  (complete)" } else { "" }
            );
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let which = std::env::args().nth(1).unwrap_or_else(|| "institution".into());
    let flow = pick_flow(&which)?;
    tracing::info!(flow = %flow.id, "starting scripted onboarding run");

    let mut engine = WizardEngine::with_ports(
        flow,
        Box::new(FixedCodeVerifier::default()),
        Box::new(StdoutNotifier),
        Box::new(StdoutNavigator),
    )?;

    print_step_table(&engine);

    // Contact details and verification gate.
    engine.set_field("identity.name", FieldValue::scalar("Sunrise Public School"));
    engine.set_field("identity.full_name", FieldValue::scalar("A. Sharma"));
    engine.set_field("identity.phone", FieldValue::scalar("+91-98765-43210"));
    engine.set_field("identity.email", FieldValue::scalar("office@sunrise.example"));
    engine.request_verification_code()?;
    engine.submit_verification_code("123456")?;

    engine.toggle_set_member("academic.streams", "Science", true);
    engine.toggle_set_member("academic.languages", "English", true);
    engine.toggle_set_member("academic.languages", "Hindi", true);
    engine.toggle_set_member("qualification.subjects", "Mathematics", true);

    // Walk every remaining step, attaching sample documents along the way.
    let total = engine.flow().total_steps();
    for _ in 1..total {
        for slot in engine.current_step().document_slots.clone() {
            engine.attach_document(
                slot.key,
                ArtifactRef::new(format!("{}.pdf", slot.label), 64_000, "application/pdf"),
            );
        }
        engine.advance()?;
    }

    for consent in engine.flow().required_consents.clone() {
        engine.set_field(consent, FieldValue::flag(true));
    }

    print_step_table(&engine);
    engine.submit()?;

    println!(
        "--- FINAL STATE ---\n{}",
        serde_json::to_string_pretty(engine.state())?
    );
    Ok(())
}

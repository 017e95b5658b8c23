use warden_core::{decide, ActionKind, ApprovalMode, RiskClassifier};

/// Print how the guard would treat `command` under `mode`.
pub fn run(classifier: &RiskClassifier, mode: ApprovalMode, command: &str) {
    let risk = classifier.classify_command(command);
    let decision = decide(mode, ActionKind::ShellExec, risk);

    println!("command: {command}");
    println!("risk: {risk}");
    for sig in classifier.catalog().matching(command) {
        println!("  matched {} ({})", sig.name(), sig.intent());
    }
    println!("mode: {mode}");
    println!("decision: {decision}");
}

pub fn list_signatures(classifier: &RiskClassifier) {
    let catalog = classifier.catalog();
    println!("Risk signatures ({}):", catalog.len());
    for sig in catalog.signatures() {
        println!("{} - {}", sig.name(), sig.intent());
        println!("    {}", sig.pattern());
    }
}

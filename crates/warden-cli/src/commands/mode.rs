use warden_core::{ApprovalMode, ConfigStore};

pub fn show(store: &ConfigStore, saved: ApprovalMode, flag: Option<ApprovalMode>) {
    match flag {
        Some(mode) if mode != saved => {
            println!("{mode} (from --mode; saved: {saved})");
        }
        _ => println!("{saved}"),
    }
    println!("config: {}", store.path().display());
}

pub fn set(store: &ConfigStore, mode: ApprovalMode) -> anyhow::Result<()> {
    store
        .set_approval_mode(mode)
        .map_err(|e| anyhow::anyhow!("Failed to save config: {e}"))?;
    println!("Approval mode set to {mode} ({})", store.path().display());
    Ok(())
}

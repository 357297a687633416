use crate::catalog::audit_types;

pub fn execute() -> anyhow::Result<()> {
    for audit_type in audit_types() {
        let agents: Vec<String> = audit_type
            .role_configs
            .iter()
            .map(|config| config.agent_count.to_string())
            .collect();

        println!("{:<12} {}", audit_type.id, audit_type.name);
        println!("{:<12} {}", "", audit_type.description);
        println!("{:<12} agents: {}", "", agents.join(", "));
    }
    Ok(())
}

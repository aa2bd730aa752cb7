use approval_core::types::GovernanceKind;

fn main() {
    approval_cli::main_for(GovernanceKind::Pipeline);
}

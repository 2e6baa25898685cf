use std::process::{Command, Stdio};
use log::info;
use crate::config::Config;
use crate::error::LaunchError;
use crate::model::{Entry, Intent, Target};
use crate::packages::PackageManager;
use crate::sources::desktop::WAYDROID_PREFIX;

const URI_FIELD_CODES: [&str; 4] = ["%u", "%U", "%f", "%F"];

/// Turns an entry into the argv that launches it.
pub fn build_command(
    entry: &Entry,
    config: &Config,
    packages: &dyn PackageManager,
) -> Result<Vec<String>, LaunchError> {
    let argv = match entry.target() {
        Target::Command { command, terminal } => {
            let mut argv: Vec<String> = Vec::new();
            if *terminal {
                if let Some(term_cmd) = &config.general.terminal {
                    argv.extend(term_cmd.split_whitespace().map(String::from));
                }
            }
            argv.extend(command.split_whitespace().map(String::from));
            argv
        }
        Target::Intent(intent) => intent_command(intent, config, packages)?,
    };

    if argv.is_empty() {
        return Err(LaunchError::EmptyCommand);
    }
    Ok(argv)
}

fn intent_command(
    intent: &Intent,
    config: &Config,
    packages: &dyn PackageManager,
) -> Result<Vec<String>, LaunchError> {
    let Some(component) = &intent.component else {
        let mut argv: Vec<String> = config.general.opener.split_whitespace().map(String::from).collect();
        argv.push(intent.uri.clone());
        return Ok(argv);
    };

    let info = packages.activity_info(component)?;

    // Waydroid exports only start the package; the URI has to go in as an intent.
    if info.desktop_id.starts_with(WAYDROID_PREFIX) {
        return Ok(vec![
            "waydroid".to_string(),
            "app".to_string(),
            "intent".to_string(),
            "android.intent.action.VIEW".to_string(),
            intent.uri.clone(),
        ]);
    }

    let exec = info.exec.ok_or(LaunchError::EmptyCommand)?;

    let mut argv = Vec::new();
    let mut substituted = false;
    for token in exec.split_whitespace() {
        if !substituted && URI_FIELD_CODES.contains(&token) {
            argv.push(intent.uri.clone());
            substituted = true;
        } else if !token.starts_with('%') {
            argv.push(token.to_string());
        }
    }
    if !substituted {
        argv.push(intent.uri.clone());
    }
    Ok(argv)
}

pub fn execute(entry: &Entry, config: &Config, packages: &dyn PackageManager) -> Result<(), LaunchError> {
    let argv = build_command(entry, config, packages)?;
    info!("Launching {} [{}]: {:?}", entry.id(), entry.kind(), argv);

    Command::new(&argv[0])
        .args(&argv[1..])
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()?;

    Ok(())
}

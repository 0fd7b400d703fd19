//! `chatrelay config` command.

use anyhow::Result;
use console::style;

use chatrelay_types::config::RelayConfig;

/// Print the resolved configuration without exposing secrets.
pub fn show_config(config: &RelayConfig, json: bool) -> Result<()> {
    let summary = config.summary();

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    let set_or_unset = |set: bool| {
        if set {
            format!("{}", style("set").green())
        } else {
            format!("{}", style("unset").red())
        }
    };
    let assistant_or_dash = |id: Option<&chatrelay_types::assistant::AssistantId>| {
        id.map(|id| id.to_string())
            .unwrap_or_else(|| style("-").dim().to_string())
    };

    println!();
    println!(
        "  {} chatrelay v{}",
        style("⚡").bold(),
        env!("CARGO_PKG_VERSION")
    );
    println!();
    println!("  {}", style("Platform").bold().underlined());
    println!("    Base URL:          {}", summary.platform_base_url);
    println!("    API key:           {}", set_or_unset(summary.platform_api_key_set));
    println!("    Request timeout:   {}s", summary.request_timeout_secs);
    println!();
    println!("  {}", style("Assistants").bold().underlined());
    println!(
        "    Primary:           {}",
        assistant_or_dash(summary.primary_assistant.as_ref())
    );
    println!(
        "    Fallback:          {}",
        assistant_or_dash(summary.fallback_assistant.as_ref())
    );
    println!("    Fallback enabled:  {}", summary.use_fallback);
    println!("    Session scope:     {}", summary.session_scope);
    println!();
    println!("  {}", style("Model provider keys").bold().underlined());
    println!("    OpenAI:            {}", set_or_unset(summary.openai_key_set));
    println!("    Anthropic:         {}", set_or_unset(summary.anthropic_key_set));

    let missing = config.missing_required();
    if !missing.is_empty() {
        println!();
        for name in missing {
            println!("  {} {} is not set", style("!").yellow().bold(), name);
        }
    }
    println!();

    Ok(())
}

/*
[INPUT]:  Interactive user input via CLI
[OUTPUT]: Generated YAML credential file
[POS]:    CLI initialization layer
[UPDATE]: When CliConfig schema changes
*/

use anyhow::Result;
use console::style;
use dialoguer::{Input, Password, Select, theme::ColorfulTheme};
use ovh_api_adapter::Endpoint;
use std::path::Path;

use ovh_api_cli::CliConfig;

pub fn run_init(output: &Path) -> Result<()> {
    println!("{}", style("Welcome to the OVH API CLI setup").bold().cyan());
    println!(
        "{}",
        style("Create an application at https://eu.api.ovh.com/createApp/ to get a key and secret.")
            .dim()
    );

    let theme = ColorfulTheme::default();

    let endpoint_names: Vec<&str> = Endpoint::ALL.iter().map(|endpoint| endpoint.name()).collect();
    let endpoint_selection = Select::with_theme(&theme)
        .with_prompt("API endpoint")
        .items(&endpoint_names)
        .default(0)
        .interact()?;
    let endpoint = Endpoint::ALL[endpoint_selection];

    println!("\n{}", style("--- Application ---").bold());
    let application_key: String = Input::with_theme(&theme)
        .with_prompt("Application key")
        .interact_text()?;

    let application_secret: String = Password::with_theme(&theme)
        .with_prompt("Application secret")
        .interact()?;

    println!("\n{}", style("--- Consumer ---").bold());
    let consumer_key: String = Input::with_theme(&theme)
        .with_prompt("Consumer key (leave empty to request one later)")
        .allow_empty(true)
        .interact_text()?;

    let config = CliConfig {
        endpoint,
        application_key,
        application_secret,
        consumer_key: Some(consumer_key).filter(|key| !key.is_empty()),
        ..CliConfig::default()
    };
    config.save(output)?;

    println!("\n{}", style("SUCCESS!").bold().green());
    println!("Configuration written to: {}", style(output.display()).cyan());
    if config.consumer_key.is_none() {
        println!(
            "Next: {}",
            style("ovh-api-cli request-credentials --redirection <url> --save").yellow()
        );
    }

    Ok(())
}

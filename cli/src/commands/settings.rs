use anyhow::{Result, bail};
use mealplan_core::service::PlannerService;

pub(crate) fn cmd_settings_show(service: &PlannerService, json: bool) -> Result<()> {
    let settings = service.settings()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&settings)?);
        return Ok(());
    }

    let per_week = settings.recipes_per_week;
    let window = settings.repeat_window_days;
    println!("recipes_per_week:   {per_week}");
    println!("repeat_window_days: {window}");
    match &settings.webhook_url {
        Some(url) => println!("webhook_url:        {url}"),
        None => println!("webhook_url:        (not set)"),
    }
    Ok(())
}

/// Update settings in place. An empty string for `--webhook-url` clears it.
pub(crate) fn cmd_settings_set(
    service: &PlannerService,
    recipes_per_week: Option<usize>,
    repeat_window_days: Option<i64>,
    webhook_url: Option<String>,
    json: bool,
) -> Result<()> {
    if recipes_per_week.is_none() && repeat_window_days.is_none() && webhook_url.is_none() {
        bail!("Nothing to set. Pass at least one of --recipes-per-week, --repeat-window-days, --webhook-url");
    }

    let mut settings = service.settings()?;
    if let Some(n) = recipes_per_week {
        if n == 0 {
            bail!("recipes_per_week must be at least 1");
        }
        settings.recipes_per_week = n;
    }
    if let Some(days) = repeat_window_days {
        if days < 0 {
            bail!("repeat_window_days must not be negative");
        }
        settings.repeat_window_days = days;
    }
    if let Some(url) = webhook_url {
        settings.webhook_url = if url.trim().is_empty() {
            None
        } else {
            Some(url)
        };
    }

    service.save_settings(&settings)?;
    cmd_settings_show(service, json)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_set_roundtrip() {
        let service = PlannerService::new_in_memory().unwrap();
        cmd_settings_set(
            &service,
            Some(4),
            Some(14),
            Some("https://example.com/hook".to_string()),
            false,
        )
        .unwrap();

        let settings = service.settings().unwrap();
        assert_eq!(settings.recipes_per_week, 4);
        assert_eq!(settings.repeat_window_days, 14);
        assert_eq!(
            settings.webhook_url.as_deref(),
            Some("https://example.com/hook")
        );

        // Empty string clears the webhook
        cmd_settings_set(&service, None, None, Some(String::new()), false).unwrap();
        assert!(service.settings().unwrap().webhook_url.is_none());
    }

    #[test]
    fn test_settings_set_rejects_bad_values() {
        let service = PlannerService::new_in_memory().unwrap();
        assert!(cmd_settings_set(&service, Some(0), None, None, false).is_err());
        assert!(cmd_settings_set(&service, None, Some(-1), None, false).is_err());
        assert!(cmd_settings_set(&service, None, None, None, false).is_err());
    }
}

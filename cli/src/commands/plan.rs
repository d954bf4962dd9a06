use anyhow::Result;
use mealplan_core::notify;
use mealplan_core::service::PlannerService;
use rand::SeedableRng;
use rand::rngs::StdRng;

use super::helpers::parse_date;
use crate::webhook::WebhookNotifier;

pub(crate) struct PlanArgs {
    pub date: Option<String>,
    pub count: Option<usize>,
    pub seed: Option<u64>,
    pub dry_run: bool,
    pub no_notify: bool,
    pub json: bool,
}

/// Plan the week: select recipes, print the plan, deliver it to the
/// configured webhook, and record the selection in history.
///
/// A failed delivery keeps the plan out of history so the same recipes
/// stay eligible for a retry; no configured webhook means delivery is
/// simply skipped and the plan is recorded.
pub(crate) async fn cmd_plan(
    service: &PlannerService,
    notifier: &WebhookNotifier,
    args: PlanArgs,
) -> Result<()> {
    let date = parse_date(args.date.as_deref())?;

    let plan = match args.seed {
        Some(seed) => service.plan_week(date, args.count, &mut StdRng::seed_from_u64(seed))?,
        None => service.plan_week(date, args.count, &mut rand::rng())?,
    };

    if plan.pool_exhausted {
        eprintln!(
            "Warning: not enough recipes outside the repeat window; recently used recipes may repeat."
        );
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&plan)?);
    } else {
        print!("{}", notify::render_plan_text(&plan));
    }

    if !args.no_notify {
        let settings = service.settings()?;
        if let Some(url) = &settings.webhook_url {
            let subject = notify::plan_subject(&plan);
            let text = notify::render_plan_text(&plan);
            let html = notify::render_plan_html(&plan);
            if let Err(e) = notifier.send_plan(url, &subject, &text, &html).await {
                eprintln!("Warning: plan delivery failed: {e:#}");
                if !args.dry_run {
                    eprintln!("The plan was not recorded to history.");
                }
                return Ok(());
            }
            if !args.json {
                println!("Plan delivered to webhook.");
            }
        }
    }

    if !args.dry_run {
        service.record_plan(&plan)?;
    }
    Ok(())
}

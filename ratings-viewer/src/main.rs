//! Rating charts viewer
//!
//! Opens a snapshot dump and shows the distribution of one snapshot above
//! the percentile history of its perf type.
//!
//! Left/Right step through snapshots, Up/Down switch perf type.

mod browse;
mod config;
mod error;

use bevy::prelude::*;
use clap::Parser;
use rating_charts::core::Mount;
use rating_charts::render::{ChartInbox, ChartUpdate};
use rating_charts::runtime::{InitialCharts, chart_app};
use tracing::{info, warn};

use crate::browse::Browser;
use crate::config::Config;
use crate::error::ViewerError;

const DISTRIBUTION_MOUNT: &str = "distribution";
const PERCENTILES_MOUNT: &str = "percentiles";

fn push_distribution(browser: &Browser, inbox: &ChartInbox) {
    match browser.counts() {
        Ok(counts) => inbox.push(ChartUpdate::Distribution {
            mount: DISTRIBUTION_MOUNT.to_string(),
            counts,
        }),
        Err(e) => warn!("skipping snapshot: {e}"),
    }
}

fn browse_keys(keys: Res<ButtonInput<KeyCode>>, mut browser: ResMut<Browser>, inbox: Res<ChartInbox>) {
    let step = if keys.just_pressed(KeyCode::ArrowRight) {
        1
    } else if keys.just_pressed(KeyCode::ArrowLeft) {
        -1
    } else {
        0
    };
    if step != 0 && browser.step(step) {
        info!(date = %browser.date(), "snapshot");
        push_distribution(&browser, &inbox);
    }

    let cycle = if keys.just_pressed(KeyCode::ArrowUp) {
        1
    } else if keys.just_pressed(KeyCode::ArrowDown) {
        -1
    } else {
        0
    };
    if cycle != 0 {
        browser.cycle(cycle);
        info!(perf_type = browser.perf_type(), date = %browser.date(), "perf type");
        push_distribution(&browser, &inbox);
        inbox.push(ChartUpdate::Percentiles {
            mount: PERCENTILES_MOUNT.to_string(),
            series: browser.series().to_vec(),
        });
    }
}

fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    let json = std::fs::read_to_string(&config.dataset).map_err(|source| ViewerError::Io {
        path: config.dataset.clone(),
        source,
    })?;
    let browser = Browser::load(&json, &config.perf_type)?;

    let initial = InitialCharts {
        distribution: Some((
            Mount::new(DISTRIBUTION_MOUNT, config.width),
            browser.counts()?,
        )),
        percentiles: Some((
            Mount::new(PERCENTILES_MOUNT, config.width),
            browser.series().to_vec(),
        )),
    };
    let size = initial.window_size();
    let window = Window {
        title: "Ratings viewer".to_string(),
        resolution: (size.x as u32, size.y as u32).into(),
        ..default()
    };

    let mut app = chart_app(initial, window, &config.log_filter);
    info!(
        dataset = %config.dataset.display(),
        perf_type = browser.perf_type(),
        date = %browser.date(),
        "viewer started"
    );
    app.insert_resource(browser)
        .add_systems(Update, browse_keys)
        .run();
    Ok(())
}

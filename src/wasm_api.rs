//! WASM API exports for JavaScript interop
//!
//! A page creates a `JsRatingCharts` from JSON payloads, starts it inside a
//! canvas, and later pushes new data, which the running app applies on its
//! next frame. Only compiled when targeting wasm32.

#![cfg(target_arch = "wasm32")]

use wasm_bindgen::prelude::*;

use crate::core::Mount;
use crate::dataset::{parse_counts, parse_percentile_records};
use crate::render::{ChartInbox, ChartUpdate};
use crate::runtime::{InitialCharts, run_charts};

const DISTRIBUTION_MOUNT: &str = "distribution";
const PERCENTILES_MOUNT: &str = "percentiles";

fn js_error(report: error_stack::Report<crate::ChartError>) -> JsValue {
    JsValue::from_str(&format!("{report:?}"))
}

/// JavaScript-accessible handle to both rating charts.
#[wasm_bindgen]
pub struct JsRatingCharts {
    initial: InitialCharts,
    inbox: ChartInbox,
    canvas_id: String,
    started: bool,
}

#[wasm_bindgen]
impl JsRatingCharts {
    /// # Arguments
    /// * `counts_json` - array of 80 player counts
    /// * `percentiles_json` - array of `{ percentile, line: [{ date, rating }] }`
    /// * `canvas_id` - HTML canvas element ID (without #)
    /// * `width` - width of each chart in pixels
    #[wasm_bindgen(constructor)]
    pub fn new(
        counts_json: &str,
        percentiles_json: &str,
        canvas_id: &str,
        width: f32,
    ) -> Result<JsRatingCharts, JsValue> {
        let counts = parse_counts(counts_json).map_err(js_error)?;
        let series = parse_percentile_records(percentiles_json).map_err(js_error)?;

        Ok(JsRatingCharts {
            initial: InitialCharts {
                distribution: Some((Mount::new(DISTRIBUTION_MOUNT, width), counts)),
                percentiles: Some((Mount::new(PERCENTILES_MOUNT, width), series)),
            },
            inbox: ChartInbox::default(),
            canvas_id: canvas_id.to_string(),
            started: false,
        })
    }

    /// Starts the Bevy render loop. Only the first call has an effect.
    #[wasm_bindgen]
    pub fn start(&mut self) {
        if self.started {
            web_sys::console::warn_1(&"Rating charts already started".into());
            return;
        }
        self.started = true;
        run_charts(self.initial.clone(), &self.canvas_id, self.inbox.clone());
    }

    /// Rebinds the distribution chart to a new array of 80 counts.
    #[wasm_bindgen]
    pub fn update_distribution(&self, counts_json: &str) -> Result<(), JsValue> {
        let counts = parse_counts(counts_json).map_err(js_error)?;
        self.inbox.push(ChartUpdate::Distribution {
            mount: DISTRIBUTION_MOUNT.to_string(),
            counts,
        });
        Ok(())
    }

    /// Rebinds the percentile chart; lines are matched by percentile.
    #[wasm_bindgen]
    pub fn update_percentiles(&self, percentiles_json: &str) -> Result<(), JsValue> {
        let series = parse_percentile_records(percentiles_json).map_err(js_error)?;
        self.inbox.push(ChartUpdate::Percentiles {
            mount: PERCENTILES_MOUNT.to_string(),
            series,
        });
        Ok(())
    }

    #[wasm_bindgen(getter)]
    pub fn canvas_id(&self) -> String {
        self.canvas_id.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn is_started(&self) -> bool {
        self.started
    }
}

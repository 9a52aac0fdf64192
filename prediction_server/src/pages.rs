use std::fmt::Write;

use trend_model::adapter::Prediction;
use trend_model::schema::{FEATURE_SCHEMA, FeatureRow};

const STYLE: &str = "body{font-family:sans-serif;max-width:60rem;margin:2rem auto;padding:0 1rem}\
fieldset{border:none;display:grid;grid-template-columns:repeat(3,1fr);gap:.75rem;padding:0}\
label{display:flex;flex-direction:column;font-size:.9rem}\
input,select{padding:.3rem;margin-top:.2rem}\
button{margin-top:1rem;padding:.5rem 2rem}\
.error{color:#b00020;border:1px solid #b00020;padding:.5rem}\
.result{background:#f0f4f0;border:1px solid #9c9;padding:.5rem 1rem;margin-bottom:1rem}";

/// The single page: title, optional error banner, optional result block, and
/// the input form pre-filled with the submitted (or default) values.
pub fn page(row: &FeatureRow, result: Option<&Prediction>, error: Option<&str>) -> String {
    let mut html = String::with_capacity(4096);
    html.push_str("<!DOCTYPE html><html><head><meta charset=\"utf-8\">");
    html.push_str("<title>Nifty 50 Trend Prediction</title>");
    let _ = write!(html, "<style>{STYLE}</style></head><body>");
    html.push_str("<h1>Nifty 50 Trend Prediction</h1>");
    html.push_str(
        "<p>Predicts the next day's trend for the Nifty 50 index (1 = Up, 0 = Down) \
         using a random forest model. Enter the features below and click <b>Predict</b>.</p>",
    );

    if let Some(message) = error {
        let _ = write!(html, "<p class=\"error\">Prediction failed: {}</p>", escape(message));
    }
    if let Some(prediction) = result {
        let _ = write!(
            html,
            "<div class=\"result\"><h2>Prediction Results</h2>\
             <p><b>Predicted Trend</b>: {}</p>\
             <p><b>Probability of Down (0)</b>: {:.2}%</p>\
             <p><b>Probability of Up (1)</b>: {:.2}%</p></div>",
            prediction.trend,
            prediction.p_down * 100.0,
            prediction.p_up * 100.0,
        );
    }

    html.push_str("<form method=\"post\" action=\"/predict\"><h2>Input Features</h2><fieldset>");
    for (field, value) in FEATURE_SCHEMA.iter().zip(row.to_array()) {
        if field.binary {
            let _ = write!(
                html,
                "<label>{name}<select name=\"{name}\" title=\"{help}\">\
                 <option value=\"0\"{sel0}>0</option><option value=\"1\"{sel1}>1</option>\
                 </select></label>",
                name = field.name,
                help = field.help,
                sel0 = if value != 1.0 { " selected" } else { "" },
                sel1 = if value == 1.0 { " selected" } else { "" },
            );
        } else {
            let _ = write!(
                html,
                "<label>{name}<input type=\"number\" name=\"{name}\" title=\"{help}\" \
                 min=\"{min}\" max=\"{max}\" step=\"{step}\" value=\"{value}\" required></label>",
                name = field.name,
                help = field.help,
                min = field.min,
                max = field.max,
                step = field.step,
                value = value,
            );
        }
    }
    html.push_str("</fieldset><button type=\"submit\">Predict</button></form></body></html>");
    html
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

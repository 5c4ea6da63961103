use anyhow::{Context, Result};
use handlebars::{handlebars_helper, Handlebars};
use serde::Serialize;
use timecodetool::handlers::{CalculateResponse, SpanResponse, ValidateResponse};

#[derive(Debug, Clone)]
pub enum Format {
    Json,
    Text,
}

impl clap::ValueEnum for Format {
    fn value_variants<'a>() -> &'a [Self] {
        &[Self::Json, Self::Text]
    }

    fn to_possible_value(&self) -> Option<clap::builder::PossibleValue> {
        match self {
            Self::Json => Some(clap::builder::PossibleValue::new("json")),
            Self::Text => Some(clap::builder::PossibleValue::new("text")),
        }
    }
}

pub fn validate(zult: &ValidateResponse, format: &Format) -> Result<String> {
    render(zult, VALIDATE_TEMPLATE, format)
}

pub fn span(zult: &SpanResponse, format: &Format) -> Result<String> {
    render(zult, SPAN_TEMPLATE, format)
}

pub fn calculate(zult: &CalculateResponse, format: &Format) -> Result<String> {
    render(zult, CALCULATE_TEMPLATE, format)
}

fn render<T: Serialize>(zult: &T, template: &str, format: &Format) -> Result<String> {
    match format {
        Format::Json => {
            let mut s = serde_json::to_string_pretty(zult).context("serializing to json")?;
            s.push('\n');
            Ok(s)
        }
        Format::Text => render_text(zult, template),
    }
}

fn render_text<T: Serialize>(zult: &T, template: &str) -> Result<String> {
    handlebars_helper!(fixed: |v: f64, digits: u64| format!("{v:.*}", digits as usize));

    let mut hb = Handlebars::new();
    hb.register_escape_fn(handlebars::no_escape);
    hb.register_helper("fixed", Box::new(fixed));
    hb.register_template_string("response", template)
        .context("parsing template")?;

    hb.render("response", zult).context("rendering text")
}

const VALIDATE_TEMPLATE: &str = r"🎥 TimecodeTool Validate
─────────────────────────────
Input Timecode:   {{ inputTimecode }}
Frame Rate (FPS): {{ fixed inputFps 2 }}
{{ #if valid }}Valid Timecode:   ✅ Yes{{ #if isDf }} (Drop Frame){{ /if }}
Frame Index:      {{ frameIdx }}
Next Timecode:    {{ nextTimecode }}
{{ else }}Valid Timecode:   ❌ No
Error:            {{ errorMsg }}
{{ /if }}─────────────────────────────
";

const SPAN_TEMPLATE: &str = r"🎥 TimecodeTool Span
─────────────────────────────
First Timecode:       {{ inputFirstTimecode }}
Last Timecode:        {{ inputLastTimecode }}
Frame Rate (FPS):     {{ fixed inputFps 2 }}
{{ #if valid }}Valid Span:           ✅ Yes{{ #if excludeLastTimecode }} (Last Timecode Excluded){{ /if }}
Start Frame Index:    {{ startFrameIdx }}
Last Frame Index:     {{ lastFrameIdx }}
Length (Frames):      {{ lengthFrames }}
Length (Real Time):   {{ lengthTime }}
Length (Seconds):     {{ fixed lengthSeconds 2 }}
Length (Timecode):    {{ lengthTimecode }}
Next Timecode:        {{ nextTimecode }}
{{ else }}Valid Span:           ❌ No
Error:                {{ errorMsg }}
{{ /if }}─────────────────────────────
";

const CALCULATE_TEMPLATE: &str = r#"🎥 TimecodeTool Calculate
─────────────────────────────
{{ #if valid }} 🎬 Starting Timecode:   {{ inputFirstTimecode }} (Index {{ startFrameIdx }})
{{ #each steps }}{{ #if (eq operation "+") }}   ➕ Add Timecode:     {{ else }}   ➖ Sub Timecode:     {{ /if }}{{ timecode }} ({{ frames }} frames)
{{ /each }}─────────────────────────────
 🟰 Resulting Timecode:  {{ lastTimecode }} ({{ lengthFrames }} total frames)
{{ startFrameIdx }} ➡️ {{ lastFrameIdx }} frame indexes
{{ else }}Starting Timecode:    {{ inputFirstTimecode }}
Error:                {{ errorMsg }}
{{ /if }}─────────────────────────────
"#;

//! Runs the rendered inline script under node against stubbed browser
//! globals and checks it leaves the document exactly as `boot` does.
//!
//! Skipped when no `node` binary is on the PATH.

use std::io::Write;
use std::process::{Command, Stdio};

use serde::Deserialize;
use serde_json::json;
use tint::{
    boot, Accent, AppearanceProbe, DefaultTheme, FailingProbe, FixedProbe, MemoryDocument,
    MemoryStorage, Mode, PrebootScript, PreferenceStore, StorageMedium, ThemeConfig,
    UnavailableStorage,
};

const DRIVER: &str = r#"
const results = cases.map((c) => {
  const classes = new Set(c.classes);
  const style = {};
  const window = {
    get localStorage() {
      if (c.storage === null) { throw new Error("SecurityError"); }
      return { getItem: (k) => (Object.prototype.hasOwnProperty.call(c.storage, k) ? c.storage[k] : null) };
    },
    matchMedia: (query) => {
      if (query !== expectedQuery || c.dark === null) { throw new Error("unsupported"); }
      return { matches: c.dark };
    },
  };
  const document = {
    documentElement: {
      classList: {
        add: (...tokens) => tokens.forEach((t) => classes.add(t)),
        remove: (token) => classes.delete(token),
      },
      style,
    },
  };
  new Function("window", "document", script)(window, document);
  return { classes: Array.from(classes).sort(), scheme: style.colorScheme === undefined ? null : style.colorScheme };
});
process.stdout.write(JSON.stringify(results));
"#;

/// One page load: what is stored, what the OS reports, what the root
/// already carries.
#[derive(Debug, Clone)]
struct Case {
    /// `None` when storage access throws.
    storage: Option<Vec<(String, String)>>,
    /// `None` when the media query throws.
    dark: Option<bool>,
    classes: Vec<String>,
}

#[derive(Debug, PartialEq, Deserialize)]
struct Rendered {
    classes: Vec<String>,
    scheme: Option<String>,
}

fn cases(config: &ThemeConfig) -> Vec<Case> {
    let accents: Vec<Option<&str>> = Accent::tokens()
        .map(Some)
        .chain([None, Some("nonexistent-color"), Some(""), Some("Rose")])
        .collect();
    let modes: Vec<Option<&str>> = Mode::tokens()
        .map(Some)
        .chain([None, Some("auto"), Some(" dark")])
        .collect();
    let documents: [&[&str]; 3] = [
        &[],
        &["system", "rose", "zinc", "light", "dark"],
        &["sidebar-open", "blue", "system"],
    ];

    let mut out = Vec::new();
    for accent in &accents {
        for mode in &modes {
            let mut entries = Vec::new();
            if let Some(accent) = accent {
                entries.push((config.accent_key.clone(), accent.to_string()));
            }
            if let Some(mode) = mode {
                entries.push((config.mode_key.clone(), mode.to_string()));
            }
            for dark in [Some(true), Some(false), None] {
                for classes in documents {
                    out.push(Case {
                        storage: Some(entries.clone()),
                        dark,
                        classes: classes.iter().map(|c| c.to_string()).collect(),
                    });
                }
            }
        }
    }
    for dark in [Some(true), Some(false), None] {
        out.push(Case {
            storage: None,
            dark,
            classes: vec!["dark".to_string()],
        });
    }
    out
}

fn boot_case(config: &ThemeConfig, case: &Case) -> Rendered {
    let medium: Box<dyn StorageMedium> = match &case.storage {
        Some(entries) => {
            let storage = entries
                .iter()
                .fold(MemoryStorage::new(), |storage, (k, v)| storage.with_entry(k, v));
            Box::new(storage)
        }
        None => Box::new(UnavailableStorage),
    };
    let probe: Box<dyn AppearanceProbe> = match case.dark {
        Some(dark) => Box::new(FixedProbe(dark)),
        None => Box::new(FailingProbe),
    };
    let doc = MemoryDocument::with_classes(case.classes.iter().cloned());

    let store = PreferenceStore::from_config(medium, config);
    boot(&store, &config.default_theme, Some(&*probe), &doc);

    let snapshot = doc.snapshot();
    Rendered {
        classes: snapshot.classes.into_iter().collect(),
        scheme: snapshot.color_scheme.map(|a| a.as_str().to_string()),
    }
}

fn run_script(node: &std::path::Path, config: &ThemeConfig, cases: &[Case]) -> Vec<Rendered> {
    let script = PrebootScript::new(config).render().unwrap();
    let js_cases: Vec<_> = cases
        .iter()
        .map(|case| {
            json!({
                "storage": case.storage.as_ref().map(|entries| {
                    entries
                        .iter()
                        .map(|(k, v)| (k.clone(), json!(v)))
                        .collect::<serde_json::Map<_, _>>()
                }),
                "dark": case.dark,
                "classes": case.classes,
            })
        })
        .collect();
    let program = format!(
        "const script = {};\nconst cases = {};\nconst expectedQuery = {};\n{}",
        serde_json::to_string(&script).unwrap(),
        serde_json::to_string(&js_cases).unwrap(),
        serde_json::to_string(tint::PREFERS_DARK_QUERY).unwrap(),
        DRIVER,
    );

    let mut child = Command::new(node)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    child
        .stdin
        .take()
        .unwrap()
        .write_all(program.as_bytes())
        .unwrap();
    let output = child.wait_with_output().unwrap();
    assert!(
        output.status.success(),
        "node failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).unwrap()
}

fn assert_script_matches_boot(config: ThemeConfig) {
    let Ok(node) = which::which("node") else {
        eprintln!("node not found on PATH, skipping inline script comparison");
        return;
    };

    let cases = cases(&config);
    let from_script = run_script(&node, &config, &cases);
    assert_eq!(from_script.len(), cases.len());

    for (case, rendered) in cases.iter().zip(from_script) {
        assert_eq!(rendered, boot_case(&config, case), "diverged for {case:?}");
    }
}

#[test]
fn script_matches_boot_with_default_config() {
    assert_script_matches_boot(ThemeConfig::default());
}

#[test]
fn script_matches_boot_with_custom_keys_and_defaults() {
    assert_script_matches_boot(
        ThemeConfig::new()
            .with_keys("app-accent", "app-mode")
            .with_default_theme(DefaultTheme::new().with_accent("violet").with_mode("dark")),
    );
}

#[test]
fn script_matches_boot_with_invalid_configured_defaults() {
    assert_script_matches_boot(
        ThemeConfig::new()
            .with_default_theme(DefaultTheme::new().with_accent("teal").with_mode("sepia")),
    );
}

use serde::Serialize;
use tinytemplate::TinyTemplate;

/// Renders a prompt template using `TinyTemplate`.
///
/// Template variables use the `{name}` syntax. The default formatter is
/// replaced with the unescaped one: prompts carry user text verbatim and
/// must not be HTML-entity encoded on the way to the model.
///
/// # Examples
///
/// ```
/// use playground_rs::render_prompt;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Ctx { text: &'static str }
///
/// let out = render_prompt("Summarize: {text}", &Ctx { text: "a & b" }).unwrap();
/// assert_eq!(out, "Summarize: a & b");
/// ```
#[inline]
pub fn render_prompt<T: Serialize>(
    template: &str,
    ctx: &T,
) -> Result<String, tinytemplate::error::Error> {
    let mut tt = TinyTemplate::new();
    tt.set_default_formatter(&tinytemplate::format_unescaped);
    tt.add_template("prompt", template)?;
    tt.render("prompt", ctx)
}

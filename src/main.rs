//! vattr - preview a virtual attribute expression from the command line

use anyhow::{bail, Context, Result};
use clap::Parser as ClapParser;
use std::process::ExitCode;
use vattr::access::Value;
use vattr::expression::Expression;
use vattr::preview::{ExpressionPreviewEvaluator, Preview};
use vattr::result_set::{ResultSetModel, ResultSetSource};
use vattr::syntax::parse_expression;

/// Evaluate a virtual attribute expression against one row
#[derive(ClapParser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Expression to preview
    expression: String,

    /// Row attribute as NAME=LITERAL, e.g. -a id=1 -a "name='Alice'"
    #[arg(short, long = "attribute", value_name = "NAME=LITERAL")]
    attributes: Vec<String>,

    /// Name of the virtual attribute being defined
    #[arg(short, long, default_value = "column")]
    name: String,

    /// Behave as if no row were selected
    #[arg(long)]
    no_row: bool,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();

    let log_level = if args.debug { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let model = build_model(&args.attributes, !args.no_row)?;
    let preview = ExpressionPreviewEvaluator::new().preview(
        &args.expression,
        model.attributes(),
        model.current_row(),
        &args.name,
    );

    println!("{}", preview);
    Ok(match preview {
        Preview::Ready(result) if result.is_error() => ExitCode::FAILURE,
        _ => ExitCode::SUCCESS,
    })
}

/// Build a one-row result set from `NAME=LITERAL` pairs
fn build_model(pairs: &[String], select_row: bool) -> Result<ResultSetModel> {
    let mut names = Vec::with_capacity(pairs.len());
    let mut values = Vec::with_capacity(pairs.len());

    for pair in pairs {
        let (name, literal) = pair
            .split_once('=')
            .with_context(|| format!("Attribute '{}' is not in NAME=LITERAL form", pair))?;
        let name = name.trim();
        if name.is_empty() {
            bail!("Attribute '{}' has an empty name", pair);
        }
        names.push(name.to_string());
        values.push(parse_literal(literal).with_context(|| format!("Invalid value for '{}'", name))?);
    }

    let mut model = ResultSetModel::new(names)?;
    let row = model.push_row(values)?;
    if select_row {
        model.select(row)?;
    }
    Ok(model)
}

/// A value given on the command line is a constant expression
fn parse_literal(text: &str) -> Result<Value> {
    let expr = parse_expression(text)?;
    if !expr.is_constant() {
        bail!("'{}' is not a literal", text.trim());
    }
    match expr {
        Expression::Literal(lit) => Ok(lit.value),
        other => {
            let value = vattr::expression::evaluate_expression(&other, &[], &[])?;
            Ok(value)
        }
    }
}

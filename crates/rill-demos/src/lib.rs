//! The five demonstration pipelines.
//!
//! Each demonstration writes a header and its elements one per line.
//! Consecutive demonstrations are separated by a blank line. They are
//! independent: [`run_all`] keeps going after one of them fails.

use std::fmt::Display;
use std::io::Write;

use rill_chain::prelude::*;
use rill_core::config::RunConfig;
use rill_core::error::{Result, RillError};
use rill_core::step::{Identity, Step};

const NUMBERS: std::ops::RangeInclusive<i32> = 1..=10;
const NAMES: [&str; 3] = ["ana", "juan", "elena"];
const FRUITS: [&str; 5] = ["manzana", "naranja", "manzana", "pera", "naranja"];
const UNSORTED: [i32; 5] = [5, 2, 8, 1, 3];
const WORDS: [&str; 3] = ["Java", "es", "funcional"];
const PHRASES: [&str; 3] = [
    "Java es un lenguaje versátil",
    "La programación funcional en Java es poderosa",
    "Java tiene streams para procesamiento de datos",
];

/// A named demonstration that writes its output to a sink.
pub struct Demo {
    pub title: &'static str,
    pub run: fn(&mut dyn Write) -> Result<()>,
}

/// The demonstrations in the order they are run.
pub fn catalog() -> Vec<Demo> {
    vec![
        Demo {
            title: "filter (filtrar)",
            run: filter_demo,
        },
        Demo {
            title: "map (mapear/transformar)",
            run: map_demo,
        },
        Demo {
            title: "distinct (elementos únicos)",
            run: distinct_demo,
        },
        Demo {
            title: "sorted (ordenar)",
            run: sorted_demo,
        },
        Demo {
            title: "Pipeline de Streams",
            run: pipeline_demo,
        },
    ]
}

/// Run one demonstration under the `--- Ejemplo N: title ---` header.
pub fn run_demo(number: usize, demo: &Demo, out: &mut dyn Write) -> Result<()> {
    tracing::debug!(demo = demo.title, number, "running demonstration");
    writeln!(out, "--- Ejemplo {number}: {} ---", demo.title)?;
    let outcome = (demo.run)(out);
    out.flush()?;
    outcome
}

/// Run every demonstration, isolating failures. Returns how many failed.
///
/// A blank line separates each demonstration from the previous one, even
/// when the previous one failed part way through.
pub fn run_all(demos: &[Demo], out: &mut dyn Write) -> usize {
    let mut failed = 0;
    for (index, demo) in demos.iter().enumerate() {
        let separator = if index == 0 {
            Ok(())
        } else {
            writeln!(out).map_err(RillError::from)
        };
        if let Err(e) = separator.and_then(|()| run_demo(index + 1, demo, out)) {
            failed += 1;
            tracing::error!(demo = demo.title, error = %e, "demonstration failed");
        }
    }
    failed
}

// Length in characters, not bytes.
fn char_count(text: &str) -> usize {
    text.chars().count()
}

fn print_each<'a, S, I>(pipeline: &'a Pipeline<S>, input: I, out: &mut dyn Write) -> Result<()>
where
    S: Step,
    S::Output: Display,
    I: IntoIterator<Item = S::Input>,
    I::IntoIter: 'a,
{
    pipeline.try_for_each(input, |value| {
        writeln!(out, "{value}")?;
        Ok(())
    })?;
    Ok(())
}

/// Keep the even numbers of 1..=10.
pub fn filter_demo(out: &mut dyn Write) -> Result<()> {
    let evens = Pipeline::new()
        .with_config(RunConfig::new().with_name("even_numbers"))
        .filter(|n: &i32| n % 2 == 0);
    print_each(&evens, NUMBERS, out)
}

/// Upper-case each name, then print each name's length.
pub fn map_demo(out: &mut dyn Write) -> Result<()> {
    let upper = Pipeline::new()
        .with_config(RunConfig::new().with_name("upper_case_names"))
        .map(|name: &'static str| name.to_uppercase());
    print_each(&upper, NAMES, out)?;
    writeln!(out)?;

    let lengths = Pipeline::new()
        .with_config(RunConfig::new().with_name("name_lengths"))
        .map(|name: &'static str| char_count(name));
    print_each(&lengths, NAMES, out)
}

pub fn distinct_demo(out: &mut dyn Write) -> Result<()> {
    let unique = Pipeline::<Identity<&str>>::new()
        .with_config(RunConfig::new().with_name("unique_fruits"))
        .distinct();
    print_each(&unique, FRUITS, out)
}

/// Sort numbers naturally, then words by length.
pub fn sorted_demo(out: &mut dyn Write) -> Result<()> {
    let numbers = Pipeline::<Identity<i32>>::new()
        .with_config(RunConfig::new().with_name("sorted_numbers"))
        .sorted();
    print_each(&numbers, UNSORTED, out)?;
    writeln!(out)?;

    let by_length = Pipeline::new()
        .with_config(RunConfig::new().with_name("words_by_length"))
        .sorted_by_key(|word: &&'static str| char_count(word));
    print_each(&by_length, WORDS, out)
}

/// Split phrases into words, lower-case them, drop repeats, and sort.
pub fn pipeline_demo(out: &mut dyn Write) -> Result<()> {
    let splitter = Splitter::new(" ")?;
    let vocabulary = Pipeline::new()
        .with_config(RunConfig::new().with_name("vocabulary").with_tag("integrating"))
        .flat_map(move |phrase: &'static str| splitter.split(phrase))
        .map(|word| word.to_lowercase())
        .distinct()
        .sorted();
    print_each(&vocabulary, PHRASES, out)
}

//! # Basic Pipeline Demo
//!
//! Builds a few branches off one sorted pipeline and prints what each
//! terminal sees. A `DEBUG` subscriber is installed so the library's
//! evaluation events show up alongside the output.

use seqweave::{Pipeline, PipelineError, wrap};

fn print_each<V: std::fmt::Debug>(label: &str, pipeline: &Pipeline<V>) -> Result<(), PipelineError<String>>
where
  V: Clone,
{
  println!("{label}:");
  pipeline.for_each(|i, v| {
    println!("  for each {i}: {v:?}");
    Ok(())
  })
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
  tracing_subscriber::fmt()
    .with_max_level(tracing::Level::DEBUG)
    .init();

  let values = vec![1, 9, 9, 9, 2, 3, 4, 5, 5, 5, 5, 6, 7, 8, 9];
  let sorted = Pipeline::new(values)
    .with_name("sorted")
    .sort(|_, a, _, b| b < a);
  let distinct = sorted.distinct(|_, a, _, b| a == b).with_name("distinct");
  let filtered = distinct
    .peek(|i, v| println!("  peek {i}: {v}"))
    .skip(5)
    .peek(|i, v| println!("  peek {i}: {v}"))
    .filter(|_, v| v % 3 == 0)
    .peek(|i, v| println!("  peek {i}: {v}"))
    .with_name("filtered");
  let mapped = wrap(&sorted, |i, v| [format!("index:{i}"), format!("value:{v}")]).with_name("mapped");

  print_each("Filtered", &filtered)?;
  print_each("Distinct", &distinct)?;
  print_each("Original sorted", &sorted)?;
  print_each("Map", &mapped)?;
  println!("{:?}", mapped.first_by(|_, s| s.starts_with("index:3")));

  sorted.for_each_chunk(6, |from, to, chunk| {
    println!("From: {from}    To: {to}   Chunk: {chunk:?}");
    Ok::<_, String>(())
  })?;

  let total = std::sync::atomic::AtomicI64::new(0);
  sorted
    .with_parallelism(4)
    .for_each_chunk_async(4, |_, _, chunk| {
      let sum: i64 = chunk.iter().map(|v| i64::from(*v)).sum();
      total.fetch_add(sum, std::sync::atomic::Ordering::SeqCst);
      Ok::<_, String>(())
    })?;

  println!("{:?}", sorted.get());
  println!("count: {}, sum: {}", sorted.count(), total.into_inner());
  Ok(())
}

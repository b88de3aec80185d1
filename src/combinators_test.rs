//! Tests for wrap/map and join.

use crate::{Pipeline, join, map, wrap};
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq)]
struct City {
  name: String,
  country_code: String,
}

#[derive(Debug, Clone, PartialEq)]
struct Country {
  code: String,
  name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CityView {
  name: String,
  country_name: String,
}

fn city(name: &str, country_code: &str) -> City {
  City {
    name: name.to_string(),
    country_code: country_code.to_string(),
  }
}

fn country(code: &str, name: &str) -> Country {
  Country {
    code: code.to_string(),
    name: name.to_string(),
  }
}

fn view(name: &str, country_name: &str) -> CityView {
  CityView {
    name: name.to_string(),
    country_name: country_name.to_string(),
  }
}

fn city_views(cities: &Pipeline<City>, countries: &Pipeline<Country>) -> Pipeline<CityView> {
  join(
    cities,
    |_, c| c.country_code.clone(),
    countries,
    |_, c| c.code.clone(),
    |city, country| {
      [CityView {
        name: city.map_or_else(|| "unknown city".to_string(), |c| c.name.clone()),
        country_name: country.map_or_else(|| "unknown country".to_string(), |c| c.name.clone()),
      }]
    },
  )
}

#[test]
fn test_wrap() {
  let source = Pipeline::new((1..=8).collect::<Vec<i32>>());
  let wrapped = wrap(&source, |i, v| [format!("Index: {i}"), format!("Value: {v}")]);

  let expected: Vec<String> = (1..=8)
    .enumerate()
    .flat_map(|(i, v)| [format!("Index: {i}"), format!("Value: {v}")])
    .collect();
  assert_eq!(wrapped.get(), expected);
  assert_eq!(wrapped.steps(), 0);
}

#[test]
fn test_map_is_wrap() {
  let source = Pipeline::new(vec![1, 2, 3]).reverse();
  let doubled = map(&source, |_, v| Some(v * 2));
  assert_eq!(doubled.get(), vec![6, 4, 2]);
}

#[test]
fn test_wrap_can_drop_and_fan_out() {
  let source = Pipeline::new(vec![0usize, 1, 2, 3]);
  let repeated = wrap(&source, |_, v| vec!['x'; *v]);
  assert_eq!(repeated.count(), 6);
}

#[test]
fn test_wrap_evaluates_source_once_and_detaches() {
  let source = Pipeline::new(vec![1, 2, 3]).with_name("source");
  let wrapped = wrap(&source, |_, v| [*v]);
  assert_eq!(wrapped.name(), Some("source"));
  assert_eq!(wrapped.source_len(), 3);
  assert_eq!(source.get(), wrapped.get());
}

#[test]
fn test_join() {
  let cities = Pipeline::new(vec![
    city("Gomel", "by"),
    city("Minsk", "by"),
    city("London", "gb"),
    city("Istanbul", "tr"),
  ]);
  let countries = Pipeline::new(vec![
    country("by", "Belarus"),
    country("tr", "Turkiye"),
    country("cn", "China"),
  ]);

  assert_eq!(
    city_views(&cities, &countries).get(),
    vec![
      view("Gomel", "Belarus"),
      view("Minsk", "Belarus"),
      view("London", "unknown country"),
      view("Istanbul", "Turkiye"),
      view("unknown city", "China"),
    ]
  );
}

#[test]
fn test_join_unmatched_right_rows_come_last() {
  let cities = Pipeline::new(vec![city("Minsk", "by")]);
  let countries = Pipeline::new(vec![
    country("cn", "China"),
    country("by", "Belarus"),
    country("jp", "Japan"),
  ]);

  let rows = city_views(&cities, &countries).get();
  assert_eq!(rows[0], view("Minsk", "Belarus"));
  let tail: HashSet<CityView> = rows[1..].iter().cloned().collect();
  assert_eq!(
    tail,
    HashSet::from([view("unknown city", "China"), view("unknown city", "Japan")])
  );
}

#[test]
fn test_join_last_duplicate_right_key_wins() {
  let left = Pipeline::new(vec![("a", 1)]);
  let right = Pipeline::new(vec![("a", "old"), ("a", "new")]);
  let rows = join(&left, |_, l| l.0, &right, |_, r| r.0, |l, r| {
    [(l.map(|l| l.1), r.map(|r| r.1))]
  });
  assert_eq!(rows.get(), vec![(Some(1), Some("new"))]);
}

#[test]
fn test_join_right_key_consumed_by_first_left_match_only() {
  let left = Pipeline::new(vec![("k", 1), ("k", 2)]);
  let right = Pipeline::new(vec![("k", 'r')]);
  let rows = join(&left, |_, l| l.0, &right, |_, r| r.0, |l, r| {
    [(l.map(|l| l.1), r.map(|r| r.1))]
  });
  assert_eq!(rows.get(), vec![(Some(1), Some('r')), (Some(2), Some('r'))]);
}

#[test]
fn test_join_merge_may_emit_many_or_no_rows() {
  let left = Pipeline::new(vec![1, 2, 3]);
  let right = Pipeline::new(vec![2, 4]);
  let rows = join(&left, |_, v| *v, &right, |_, w| *w, |l, r| match (l, r) {
    (Some(l), Some(_)) => vec![*l, *l],
    (Some(_), None) => vec![],
    (None, Some(r)) => vec![-*r],
    (None, None) => unreachable!(),
  });
  assert_eq!(rows.get(), vec![2, 2, -4]);
}

fn pair(l: Option<&i32>, r: Option<&i32>) -> [(Option<i32>, Option<i32>); 1] {
  [(l.copied(), r.copied())]
}

#[test]
fn test_join_with_empty_sides() {
  let empty = Pipeline::new(Vec::<i32>::new());
  let some = Pipeline::new(vec![1, 2]);

  assert_eq!(
    join(&empty, |_, v| *v, &some, |_, v| *v, pair).get(),
    vec![(None, Some(1)), (None, Some(2))]
  );
  assert_eq!(
    join(&some, |_, v| *v, &empty, |_, v| *v, pair).get(),
    vec![(Some(1), None), (Some(2), None)]
  );
}

#[test]
fn test_join_evaluates_chains_of_both_sides() {
  let left = Pipeline::new(vec![1, 2, 3, 4]).filter(|_, v| v % 2 == 0);
  let right = Pipeline::new(vec![4, 5]).skip(1);
  let rows = join(&left, |_, v| *v, &right, |_, w| *w, |l, r| {
    [(l.copied(), r.copied())]
  });
  assert_eq!(
    rows.get(),
    vec![(Some(2), None), (Some(4), None), (None, Some(5))]
  );
}

use std::cell::Cell;
use std::collections::BTreeMap;

use ahash::{HashMap, HashMapExt};
use eyre::{ensure, Result};
use itertools::Itertools;

use seqpipe_rs::prelude::*;
use seqpipe_rs::Error;

const PEOPLE: [(&str, u32); 3] = [("Jake", 20), ("Alexander", 35), ("Emily", 27)];

fn age(person: &(&'static str, u32)) -> u32 {
    person.1
}

/// Vector-backed source that counts how many traversals were started.
struct Counting<'a> {
    items: Vec<i32>,
    begins: &'a Cell<usize>,
}

impl Sequence for Counting<'_> {
    type Item = i32;
    type Cursor = usize;

    fn begin(&self) -> usize {
        self.begins.set(self.begins.get() + 1);
        0
    }

    fn end(&self) -> usize {
        self.items.len()
    }

    fn get(&self, cursor: &usize) -> seqpipe_rs::Result<i32> {
        Sequence::get(&self.items, cursor)
    }

    fn advance(&self, cursor: &mut usize) -> seqpipe_rs::Result<()> {
        Sequence::advance(&self.items, cursor)
    }
}

#[test]
fn scenarios() -> Result<()> {
    let chunks = vec![1, 2, 3, 4, 5]
        .pipe(chunk(2))?
        .into_elements()
        .map(|chunk| chunk.pipe(to_vec()))
        .collect_vec();
    assert_eq!(chunks, vec![vec![1, 2], vec![3, 4], vec![5]]);

    let joined = vec![1, 2, 3].pipe(concat(vec![4, 5]));
    assert_eq!(joined.size(), 5);
    assert_eq!(joined.pipe(to_vec()), vec![1, 2, 3, 4, 5]);

    assert_eq!(vec![1, 2].pipe(append(0)).pipe(to_vec()), vec![1, 2, 0]);

    assert_eq!(
        vec![2, 1, 4, 3, 5].pipe(order_descending()).pipe(to_vec()),
        vec![5, 4, 3, 2, 1]
    );

    assert_eq!(
        PEOPLE.pipe(first_where(|p: &(&str, u32)| p.1 > 30))?,
        ("Alexander", 35)
    );
    assert_eq!(
        PEOPLE.pipe(first_where_or_default(|p: &(&str, u32)| p.1 < 20)),
        None
    );
    Ok(())
}

#[test]
fn empty_sources() {
    let empty = Vec::<u64>::new();
    assert_eq!((&empty).pipe(first()), Err(Error::EmptySequence));
    assert_eq!((&empty).pipe(last()), Err(Error::EmptySequence));
    assert_eq!((&empty).pipe(first_or_default()), None);
    assert_eq!((&empty).pipe(last_or_default()), None);
    assert_eq!((&empty).pipe(min()), Err(Error::EmptySequence));
    assert_eq!((&empty).pipe(average()), Err(Error::EmptySequence));
    assert_eq!((&empty).pipe(count()), 0);
    assert_eq!(
        empty.pipe(chunk(0)).err(),
        Some(Error::invalid_argument("chunk size cannot be 0"))
    );
}

#[test]
fn chunk_properties() -> Result<()> {
    for length in 0..25usize {
        let source = range(0, length).pipe(to_vec());
        for size in 1..8 {
            let view = (&source).pipe(chunk(size))?;
            let chunks = view
                .elements()
                .map(|chunk| chunk.pipe(to_vec()))
                .collect_vec();

            ensure!(chunks.len() == length.div_ceil(size), "wrong chunk count");
            ensure!(view.size() == chunks.len(), "size disagrees with traversal");
            ensure!(chunks.concat() == source, "chunks don't reproduce the source");
            ensure!(
                chunks.iter().rev().skip(1).all(|c| c.len() == size),
                "only the last chunk may be short"
            );
        }
    }
    Ok(())
}

#[test]
fn concat_properties() -> Result<()> {
    for (left, right) in (0..6).cartesian_product(0..6) {
        let first = range(0, left).pipe(to_vec());
        let second = range(100, right).pipe(to_vec());
        let view = (&first).pipe(concat(&second));

        ensure!(view.size() == left + right, "size isn't the sum of both parts");
        let items = view.elements().collect_vec();
        ensure!(items[..left] == first[..], "first part mismatch");
        ensure!(items[left..] == second[..], "second part mismatch");

        let backward = view.elements().rev().collect_vec();
        ensure!(
            backward == items.iter().rev().copied().collect_vec(),
            "backward traversal mismatch"
        );
    }
    Ok(())
}

#[test]
fn append_past_the_end() {
    let view = range(0u8, 4).pipe(append(42));
    assert_eq!((&view).pipe(count()), 5);
    assert_eq!((&view).pipe(last()), Ok(42));

    let mut cursor = view.end();
    assert!(matches!(
        view.get(&cursor),
        Err(Error::IterationOutOfRange { .. })
    ));
    assert!(matches!(
        view.advance(&mut cursor),
        Err(Error::IterationOutOfRange { .. })
    ));
}

#[test]
fn order_drains_once() -> Result<()> {
    let begins = Cell::new(0);
    let source = Counting {
        items: vec![9, -4, 7, 0, 7, 3],
        begins: &begins,
    };
    let view = source.pipe(order_by(|x: &i32| x.abs()));
    assert_eq!(begins.get(), 0);

    let first_pass = view.elements().collect_vec();
    let second_pass = view.elements().collect_vec();
    assert_eq!(first_pass, vec![0, 3, -4, 7, 7, 9]);
    assert_eq!(first_pass, second_pass);
    assert_eq!((&view).pipe(max())?, 9);
    assert_eq!(begins.get(), 1);
    Ok(())
}

#[test]
fn building_a_pipeline_does_no_work() -> Result<()> {
    let begins = Cell::new(0);
    let source = Counting {
        items: vec![3, 1, 2],
        begins: &begins,
    };
    let calls = Cell::new(0);
    let view = source
        .pipe(order())
        .pipe(filter(|x: &i32| *x > 1))
        .pipe(map(|x: i32| {
            calls.set(calls.get() + 1);
            x * 10
        }));
    ensure!(begins.get() == 0, "source drained before iterating");
    ensure!(calls.get() == 0, "selector ran before iterating");

    assert_eq!(view.elements().collect_vec(), vec![20, 30]);
    assert_eq!(view.elements().collect_vec(), vec![20, 30]);
    assert_eq!(begins.get(), 1);
    Ok(())
}

#[test]
fn concat_leaves_second_source_alone() -> Result<()> {
    let begins = Cell::new(0);
    let tail = Counting {
        items: vec![6, 5, 4],
        begins: &begins,
    };
    let view = vec![1, 2, 3].pipe(concat(tail.pipe(order())));

    assert_eq!((&view).pipe(first())?, 1);
    assert_eq!((&view).pipe(first_where(|x: &i32| *x > 2))?, 3);
    assert_eq!((&view).pipe(element_at(1))?, 2);
    ensure!(begins.get() == 0, "second source drained before it was reached");

    assert_eq!((&view).pipe(to_vec()), vec![1, 2, 3, 4, 5, 6]);
    assert_eq!(begins.get(), 1);
    Ok(())
}

#[test]
fn long_pipeline() -> Result<()> {
    let report = range(1, 30)
        .pipe(filter(|x: &i32| x % 3 != 0))
        .pipe(map(|x: i32| x * 2))
        .pipe(take(12))
        .pipe(order_descending())
        | chunk(5);

    let sums = report?
        .into_elements()
        .map(|chunk| chunk.pipe(aggregate(|acc: i32, x: i32| acc + x)))
        .collect_vec();
    assert_eq!(sums, vec![34 + 32 + 28 + 26 + 22, 20 + 16 + 14 + 10 + 8, 4 + 2]);

    let reusable = then(skip(1), then(append(100), last()));
    assert_eq!(vec![1, 2, 3].pipe(reusable)?, 100);
    Ok(())
}

#[test]
fn terminal_operators() -> Result<()> {
    assert!(PEOPLE.pipe(all(|p: &(&str, u32)| p.1 >= 20)));
    assert!(!PEOPLE.pipe(any(|p: &(&str, u32)| p.0.is_empty())));
    assert!(PEOPLE.pipe(contains(("Emily", 27))));

    assert_eq!(PEOPLE.pipe(max_by_key(age))?.0, "Alexander");
    assert_eq!(PEOPLE.pipe(min_by_key(age))?.0, "Jake");
    assert_eq!(PEOPLE.pipe(element_at(1))?.0, "Alexander");
    assert_eq!(PEOPLE.pipe(element_at_or_default(3)), None);
    assert_eq!(PEOPLE.pipe(map(|p: (&str, u32)| p.1)).pipe(average())?, 82.0 / 3.0);

    let by_name = PEOPLE.pipe(to_map::<HashMap<_, _>, _, _>(
        |p: &(&'static str, u32)| p.0,
        age_of,
    ))?;
    let mut expected = HashMap::new();
    expected.insert("Jake", 20);
    expected.insert("Alexander", 35);
    expected.insert("Emily", 27);
    assert_eq!(by_name, expected);

    let by_decade = PEOPLE.pipe(to_map_pairs::<Overwrite<BTreeMap<_, _>>, _>(
        |p: (&'static str, u32)| (p.1 / 10, p.0),
    ))?;
    assert_eq!(
        by_decade.into_inner().into_iter().collect_vec(),
        vec![(2, "Emily"), (3, "Alexander")]
    );

    let [a, b] = range(7, 2).pipe(to_array::<2>())?;
    assert_eq!((a, b), (7, 8));
    Ok(())
}

fn age_of(person: (&'static str, u32)) -> u32 {
    person.1
}

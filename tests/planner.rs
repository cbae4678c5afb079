use csv_manager::{InsufficientRows, MAX_PARTS, MIN_PARTS, PartitionPlan};

#[test]
fn plan_sums_to_total_and_is_balanced() {
    for parts in [MIN_PARTS, 3, 7, 10, 64, 500, MAX_PARTS] {
        for total in [parts, parts + 1, parts * 2 - 1, parts * 3 + 2, 10_000] {
            if total < parts {
                continue;
            }
            let plan = PartitionPlan::new(total, parts).unwrap();
            let sizes = plan.sizes();
            assert_eq!(sizes.len(), parts);
            assert_eq!(sizes.iter().sum::<usize>(), total, "total={total} parts={parts}");
            assert_eq!(plan.total(), total);

            let q = total / parts;
            assert!(sizes.iter().all(|&s| s == q || s == q + 1));
            assert!(sizes.windows(2).all(|w| w[0] >= w[1]), "not non-increasing: {sizes:?}");
        }
    }
}

#[test]
fn ranges_are_contiguous_and_cover_everything() {
    let plan = PartitionPlan::new(1003, 10).unwrap();
    let ranges: Vec<_> = plan.ranges().collect();
    assert_eq!(ranges.len(), 10);
    assert_eq!(ranges[0].start, 0);
    assert_eq!(ranges.last().unwrap().end, 1003);
    for (w, size) in ranges.windows(2).zip(plan.sizes()) {
        assert_eq!(w[0].end, w[1].start);
        assert_eq!(w[0].len(), *size);
    }
}

#[test]
fn seven_rows_three_parts() {
    let plan = PartitionPlan::new(7, 3).unwrap();
    assert_eq!(plan.sizes(), &[3, 2, 2]);
}

#[test]
fn exact_division_is_even() {
    let plan = PartitionPlan::new(12, 4).unwrap();
    assert_eq!(plan.sizes(), &[3, 3, 3, 3]);
}

#[test]
fn one_row_per_part_is_allowed() {
    let plan = PartitionPlan::new(5, 5).unwrap();
    assert_eq!(plan.sizes(), &[1, 1, 1, 1, 1]);
}

#[test]
fn fewer_rows_than_parts_is_rejected() {
    for parts in [MIN_PARTS, 10, MAX_PARTS] {
        for total in [0, parts - 1] {
            assert_eq!(
                PartitionPlan::new(total, parts),
                Err(InsufficientRows { rows: total, parts })
            );
        }
    }
}

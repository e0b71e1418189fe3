//! Tests for department extraction

use orgtree::domain::{build, extract, DepartmentSummary, PersonRecord};
use orgtree::util::testing;

fn summary(name: &str, head_id: u64, head_name: &str, employee_count: usize) -> DepartmentSummary {
    DepartmentSummary {
        name: name.to_string(),
        head_id,
        head_name: head_name.to_string(),
        employee_count,
    }
}

#[test]
fn given_exec_chain_when_extracting_then_one_summary_counting_everyone() {
    testing::init_test_setup();
    let employees = vec![
        PersonRecord::new(2, "b").with_manager(1),
        PersonRecord::new(3, "c").with_manager(2),
    ];
    let employers = vec![PersonRecord::new(1, "a").with_department("Exec")];

    let root = build(&employees, &employers);

    assert_eq!(extract(&root, &employers), vec![summary("Exec", 1, "a", 3)]);
}

#[test]
fn given_same_department_twice_when_extracting_then_first_encountered_stays_head() {
    testing::init_test_setup();
    let employers = vec![
        PersonRecord::new(10, "first").with_department("Exec"),
        PersonRecord::new(20, "second").with_department("Exec"),
    ];
    let employees = vec![PersonRecord::new(30, "report").with_manager(20)];

    let root = build(&employees, &employers);
    let departments = extract(&root, &employers);

    assert_eq!(departments, vec![summary("Exec", 10, "first", 3)]);
}

#[test]
fn given_department_below_other_head_when_extracting_then_members_follow_own_department() {
    testing::init_test_setup();
    // 1 Sales
    // └── 2 Eng
    //     ├── 5
    //     └── 3 Sales
    //         └── 4
    let employers = vec![
        PersonRecord::new(1, "vp").with_department("Sales"),
        PersonRecord::new(2, "cto").with_manager(1).with_department("Eng"),
        PersonRecord::new(3, "rep").with_manager(2).with_department("Sales"),
    ];
    let employees = vec![
        PersonRecord::new(4, "intern").with_manager(3),
        PersonRecord::new(5, "dev").with_manager(2),
    ];

    let root = build(&employees, &employers);
    let departments = extract(&root, &employers);

    assert_eq!(
        departments,
        vec![summary("Sales", 1, "vp", 3), summary("Eng", 2, "cto", 2)]
    );
}

#[test]
fn given_synthetic_root_when_extracting_then_it_is_never_a_head() {
    testing::init_test_setup();
    let employers = vec![
        PersonRecord::new(1, "a").with_department("Ops"),
        PersonRecord::new(2, "b").with_department("Legal"),
    ];
    let employees = vec![PersonRecord::new(3, "floating")];

    let root = build(&employees, &employers);
    let departments = extract(&root, &employers);

    let names: Vec<&str> = departments.iter().map(|d| d.name.as_str()).collect();
    assert_eq!(names, vec!["Ops", "Legal"]);
    assert!(departments.iter().all(|d| d.head_id != root.id));
    assert!(departments.iter().all(|d| d.employee_count == 1));
}

#[test]
fn given_no_department_bearing_employer_when_extracting_then_empty() {
    testing::init_test_setup();
    let employers = vec![PersonRecord::new(1, "a").with_department("")];
    let employees = vec![PersonRecord::new(2, "b").with_manager(1).with_department("Eng")];

    let root = build(&employees, &employers);

    assert!(extract(&root, &employers).is_empty());
    assert!(extract(&build(&[], &[]), &[]).is_empty());
}

#[test]
fn given_employer_id_taken_by_employee_when_extracting_then_it_is_not_a_head() {
    testing::init_test_setup();
    let employees = vec![PersonRecord::new(1, "clerk")];
    let employers = vec![
        PersonRecord::new(1, "shadow").with_department("Exec"),
        PersonRecord::new(2, "b").with_department("Ops"),
    ];

    let root = build(&employees, &employers);
    let departments = extract(&root, &employers);

    assert_eq!(departments, vec![summary("Ops", 2, "b", 1)]);
    assert_eq!(root.find(1).map(|n| n.name.as_str()), Some("clerk"));
}

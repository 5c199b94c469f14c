use placemerge::{
    EdgeLabel, Translation, TreeParseError, build_bipartitions, map_bipartitions,
    map_edge_labels,
};

fn label(n: u64) -> EdgeLabel {
    EdgeLabel::Number(n)
}

#[test]
fn test_map_renumbered_tree() {
    let base = "(A:1[0],(B:1[1],C:1[2])D:1[3]);";
    let relabeled = "(A:1[5],(B:1[6],C:1[7])D:1[8]);";
    let map = map_edge_labels(relabeled, base).unwrap();

    assert_eq!(map.len(), 4);
    assert_eq!(map.translate(label(5)), Translation::Mapped(label(0)));
    assert_eq!(map.translate(label(6)), Translation::Mapped(label(1)));
    assert_eq!(map.translate(label(7)), Translation::Mapped(label(2)));
    assert_eq!(map.translate(label(8)), Translation::Mapped(label(3)));
    assert_eq!(map.translate(label(9)), Translation::UnknownLabel);
    assert!(map.unmatched().is_empty());
}

#[test]
fn test_map_pplacer_style_braces() {
    let base = "(A:1[0],(B:1[1],C:1[2])D:1[3]);";
    let relabeled = "(A:1{12},(C:1{10},B:1{11}):1{13}){14};";
    let map = map_edge_labels(relabeled, base).unwrap();

    assert_eq!(map.translate(label(12)), Translation::Mapped(label(0)));
    assert_eq!(map.translate(label(11)), Translation::Mapped(label(1)));
    assert_eq!(map.translate(label(10)), Translation::Mapped(label(2)));
    assert_eq!(map.translate(label(13)), Translation::Mapped(label(3)));
    // The root label belongs to no edge.
    assert_eq!(map.translate(label(14)), Translation::UnknownLabel);
}

#[test]
fn test_self_mapping_is_identity() {
    let test_cases = vec![
        "(A:1[0],(B:1[1],C:1[2])D:1[3]);",
        "(A[0],B[1],(C[2],(D[3],(E[4],F[5])[6])[7])[8]);",
        "((a{0},b{1}){2},(c{3},(d{4},e{5}){6}){7},f{8}){9};",
    ];
    for newick_str in test_cases {
        let map = map_edge_labels(newick_str, newick_str).unwrap();
        let parsed = build_bipartitions(newick_str).unwrap();
        assert_eq!(map.len(), parsed.table.len());
        for (old, new) in map.iter() {
            assert_eq!(
                Translation::Mapped(old),
                new,
                "Self mapping of {} is not identity",
                newick_str
            );
        }
    }
}

#[test]
fn test_map_rerooted_tree() {
    let base = "(A:1[0],B:1[1],(C:1[2],(D:1[3],E:1[4]):1[5]):1[6]);";
    let relabeled = "((A:1[20],B:1[21]):1[27],C:1[22],(D:1[23],E:1[24]):1[25]);";
    let map = map_edge_labels(relabeled, base).unwrap();

    assert_eq!(map.translate(label(20)), Translation::Mapped(label(0)));
    assert_eq!(map.translate(label(22)), Translation::Mapped(label(2)));
    assert_eq!(map.translate(label(25)), Translation::Mapped(label(5)));
    // {A,B} is the complement of the base tree's {C,D,E}.
    assert_eq!(map.translate(label(27)), Translation::Mapped(label(6)));
}

#[test]
fn test_unmatched_bipartition_maps_to_no_match() {
    let base = "((A:1[0],B:1[1]):1[4],(C:1[2],D:1[3]):1[5]);";
    let relabeled = "(A:1[10],(B:1[11],(C:1[12],D:1[13]):1[14]):1[15]);";
    let map = map_edge_labels(relabeled, base).unwrap();

    assert_eq!(map.translate(label(14)), Translation::Mapped(label(5)));
    // {B,C,D} is the far side of the pendant edge of A; pendant edges are not
    // complemented, so it has no counterpart in the base table.
    assert_eq!(map.translate(label(15)), Translation::NoMatch);
    assert_eq!(map.unmatched(), vec![label(15)]);
}

#[test]
fn test_different_leaf_sets_do_not_match() {
    let base = "(A[0],(B[1],C[2])[3]);";
    let relabeled = "(A[0],(B[1],X[2])[3]);";
    let map = map_edge_labels(relabeled, base).unwrap();

    assert_eq!(map.translate(label(0)), Translation::Mapped(label(0)));
    assert_eq!(map.translate(label(2)), Translation::NoMatch);
    assert_eq!(map.translate(label(3)), Translation::NoMatch);
    assert_eq!(map.unmatched(), vec![label(2), label(3)]);
}

#[test]
fn test_shared_unlabeled_edges_are_ambiguous() {
    let test_cases = vec![
        ("(A[0],(B[1],C[2])[3]);", "(A,(B,X));"),
        ("(A:1[0],(B:1[1],C:1[2])D:1[3]);", "(A,(B,C));"),
    ];
    for (base, relabeled) in test_cases {
        println!("{relabeled} -> {base}");
        let map = map_edge_labels(relabeled, base).unwrap();
        assert_eq!(map.len(), 1);
        assert_eq!(map.translate(EdgeLabel::Unlabeled), Translation::Ambiguous);
        assert_eq!(map.unmatched(), vec![EdgeLabel::Unlabeled]);
    }
}

#[test]
fn test_shared_label_translates_only_to_one_base_edge() {
    // The base tree numbers the two halves of its root edge differently.
    let base = "((A[0],B[1])[3],(C[4],D[5])[6]);";
    let relabeled = "((A[10],B[11])[9],(C[12],D[13])[9]);";
    let map = map_edge_labels(relabeled, base).unwrap();
    assert_eq!(map.translate(label(9)), Translation::Ambiguous);

    // Here both halves reach edge 4, one of them through its complement.
    let base = "(A[0],B[1],(C[2],D[3])[4]);";
    let relabeled = "((A[7],B[8])[9],(C[5],D[6])[9]);";
    let map = map_edge_labels(relabeled, base).unwrap();
    assert_eq!(map.translate(label(9)), Translation::Mapped(label(4)));
}

#[test]
fn test_map_bipartitions_on_prebuilt_tables() {
    let base = build_bipartitions("(A[0],B[1],(C[2],D[3])[4]);").unwrap();
    let relabeled = build_bipartitions("((A[7],B[8])[9],C[5],D[6]);").unwrap();
    let map = map_bipartitions(&relabeled.table, &base.completed());
    assert_eq!(map.translate(label(9)), Translation::Mapped(label(4)));

    // Without completion the rerooted edge is missed.
    let uncompleted = map_bipartitions(&relabeled.table, &base.table);
    assert_eq!(uncompleted.translate(label(9)), Translation::NoMatch);
}

#[test]
fn test_map_reports_parse_errors() {
    assert_eq!(
        map_edge_labels("A;", "(A,B);").err(),
        Some(TreeParseError::MissingOpenParen)
    );
    assert_eq!(
        map_edge_labels("(A,B);", "(A,(B,C);").err(),
        Some(TreeParseError::UnclosedParen(1))
    );
}

use serde_json::json;
use spectral_layout::{
    Edge, Error, Graph, SessionState, SpectralLayout, SpectralOptions, layout,
};

fn ring(n: usize) -> Graph {
    let mut g = Graph::new();
    for i in 0..n {
        g.add_node(format!("n{i}"));
    }
    for i in 0..n {
        g.add_edge(Edge::new(format!("n{i}"), format!("n{}", (i + 1) % n)));
    }
    g
}

#[test]
fn apply_before_init_is_a_usage_error() {
    let mut g = ring(4);
    let mut s = SpectralLayout::default();
    assert_eq!(s.state(), SessionState::Uninitialized);
    assert!(!s.can_apply());
    assert!(matches!(s.apply(&mut g), Err(Error::NotInitialized)));
}

#[test]
fn init_apply_end_walks_the_state_machine() {
    let mut g = ring(5);
    for n in &mut g.nodes {
        n.layout_data = Some(json!({"dx": 1.0}));
    }
    let mut s = SpectralLayout::new(SpectralOptions::default());

    s.init(&g).expect("init");
    assert_eq!(s.state(), SessionState::Ready);
    assert!(s.can_apply());
    assert_eq!(s.embedding().map(|e| e.node_count()), Some(5));

    s.apply(&mut g).expect("apply");
    assert_eq!(s.state(), SessionState::Applied);
    assert!(!s.can_apply());
    assert!(g.nodes.iter().any(|n| n.x != 0.0 || n.y != 0.0));

    assert!(matches!(s.apply(&mut g), Err(Error::AlreadyApplied)));

    s.end(&mut g);
    assert_eq!(s.state(), SessionState::Uninitialized);
    assert!(s.embedding().is_none());
    assert!(g.nodes.iter().all(|n| n.layout_data.is_none()));
    assert!(matches!(s.apply(&mut g), Err(Error::NotInitialized)));
}

#[test]
fn session_writes_the_same_positions_as_the_one_shot_layout() {
    let opts = SpectralOptions {
        scale: 1.5,
        fourth_component: 0.25,
        ..Default::default()
    };
    let mut g = ring(7);
    let expected = layout(&g, &opts).expect("layout");

    let mut s = SpectralLayout::new(opts);
    s.init(&g).expect("init");
    s.apply(&mut g).expect("apply");
    for n in &g.nodes {
        let p = expected.positions[n.id.as_str()];
        assert_eq!((n.x, n.y), (p.x, p.y));
    }
}

#[test]
fn re_init_on_an_unchanged_graph_is_identical() {
    let g = ring(8);
    let mut s = SpectralLayout::default();
    s.init(&g).expect("first init");
    let first = s.embedding().cloned().expect("embedding");
    s.init(&g).expect("second init");
    assert_eq!(s.embedding(), Some(&first));
}

#[test]
fn projection_parameters_can_change_after_init() {
    let mut a = ring(6);
    let mut b = ring(6);
    let mut s = SpectralLayout::default();

    s.init(&a).expect("init");
    s.apply(&mut a).expect("apply");
    s.end(&mut a);

    s.init(&b).expect("init");
    s.options_mut().set_scale(2.0);
    s.apply(&mut b).expect("apply");

    for (p, q) in a.nodes.iter().zip(&b.nodes) {
        assert!((q.x - 2.0 * p.x).abs() < 1e-9);
        assert!((q.y - 2.0 * p.y).abs() < 1e-9);
    }
}

#[test]
fn apply_rejects_a_graph_of_another_size() {
    let mut s = SpectralLayout::default();
    s.init(&ring(4)).expect("init");
    let mut other = ring(5);
    assert!(matches!(
        s.apply(&mut other),
        Err(Error::NodeCountMismatch {
            expected: 4,
            actual: 5
        })
    ));
}

#[test]
fn failed_init_leaves_the_session_uninitialized() {
    let mut s = SpectralLayout::default();
    s.init(&ring(3)).expect("init");
    let mut broken = ring(3);
    broken.add_edge(Edge::new("n0", "missing"));
    assert!(s.init(&broken).is_err());
    assert_eq!(s.state(), SessionState::Uninitialized);
}

#[test]
fn options_are_normalized_on_construction() {
    let s = SpectralLayout::new(SpectralOptions {
        scale: -4.0,
        ..Default::default()
    });
    assert_eq!(s.options().scale, 1.0);
}

#[test]
fn options_assigned_through_options_mut_are_normalized_on_use() {
    let mut a = ring(6);
    let mut b = ring(6);

    let mut plain = SpectralLayout::default();
    plain.init(&a).expect("init");
    plain.apply(&mut a).expect("apply");

    let mut s = SpectralLayout::default();
    s.options_mut().zero_tolerance = -1.0;
    s.init(&b).expect("init");
    assert_eq!(s.embedding(), plain.embedding());
    s.options_mut().scale = -3.0;
    s.apply(&mut b).expect("apply");

    for (p, q) in a.nodes.iter().zip(&b.nodes) {
        assert_eq!((p.x, p.y), (q.x, q.y));
    }
}

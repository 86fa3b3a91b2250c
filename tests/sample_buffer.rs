use tempscope::data::sample_buffer::SampleBuffer;

#[test]
fn keeps_only_the_most_recent_samples() {
    let mut buf = SampleBuffer::new(3);
    for v in [1.0, 2.0, 3.0, 4.0, 5.0] {
        buf.append(v);
    }
    assert_eq!(buf.values(), vec![3.0, 4.0, 5.0]);
    assert_eq!(buf.len(), 3);
    assert_eq!(buf.latest(), Some(5.0));
}

#[test]
fn length_never_exceeds_capacity() {
    let mut buf = SampleBuffer::new(4);
    for i in 0..100 {
        buf.append(i as f64);
        assert!(buf.len() <= buf.capacity());
        assert_eq!(buf.latest(), Some(i as f64));
    }
}

#[test]
fn partially_filled_buffer_keeps_arrival_order() {
    let mut buf = SampleBuffer::new(50);
    buf.append(21.5);
    buf.append(19.0);
    buf.append(22.25);
    assert_eq!(buf.values(), vec![21.5, 19.0, 22.25]);
    assert_eq!(buf.iter().collect::<Vec<_>>(), buf.values());
}

#[test]
fn full_buffer_drops_exactly_the_oldest() {
    let mut buf = SampleBuffer::new(3);
    for v in [1.0, 2.0, 3.0] {
        buf.append(v);
    }
    let before = buf.values();
    buf.append(4.0);
    let mut expected = before[1..].to_vec();
    expected.push(4.0);
    assert_eq!(buf.values(), expected);
}

#[test]
fn zero_capacity_is_clamped_to_one() {
    let mut buf = SampleBuffer::new(0);
    assert_eq!(buf.capacity(), 1);
    buf.append(1.0);
    buf.append(2.0);
    assert_eq!(buf.values(), vec![2.0]);
}

#[test]
fn clear_empties_but_keeps_capacity() {
    let mut buf = SampleBuffer::new(2);
    buf.append(1.0);
    buf.clear();
    assert!(buf.is_empty());
    assert_eq!(buf.latest(), None);
    assert_eq!(buf.capacity(), 2);
}

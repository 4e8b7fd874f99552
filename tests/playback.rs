use std::{cell::Cell, rc::Rc};

use glam::Vec3;
use proptest::prelude::*;
use signanimation::{
    sign_library::SignLibrary, AnimationTimeline, Keyframe, RigConfig, SignAnimationPlayer,
    SignSegment,
};

fn segment(sign: &str, start_time: f32, end_time: f32, keyframes: Vec<Keyframe>) -> SignSegment {
    SignSegment {
        sign: sign.to_string(),
        start_time,
        end_time,
        keyframes,
    }
}

fn hello() -> AnimationTimeline {
    AnimationTimeline::new(
        vec![segment(
            "hello",
            0.,
            2.,
            vec![
                Keyframe::new(0., [0., 0., 0.], [0., 0., 0.]),
                Keyframe::new(2., [1., 1., 1.], [0., 0., 0.]),
            ],
        )],
        2.,
    )
}

fn gapped() -> AnimationTimeline {
    AnimationTimeline::new(
        vec![
            segment(
                "hello",
                1.,
                2.,
                vec![
                    Keyframe::new(1., [0.1, 0.2, 0.3], [0., 0., 0.]),
                    Keyframe::new(2., [0.4, 0.5, 0.6], [-0.1, 0.2, 0.]),
                ],
            ),
            segment(
                "thank_you",
                3.,
                4.,
                vec![
                    Keyframe::new(3., [0., 0.3, 0.], [0., 0., 0.]),
                    Keyframe::new(3.5, [0., 0.6, 0.3], [0., 0., 0.]),
                    Keyframe::new(4., [0.2, 0.4, 0.1], [0., 0., 0.]),
                ],
            ),
        ],
        4.5,
    )
}

fn player(timeline: AnimationTimeline) -> SignAnimationPlayer {
    SignAnimationPlayer::with_timeline(RigConfig::default(), timeline)
}

#[test]
fn midpoint_of_a_linear_wave() {
    let pose = player(hello()).pose_at(1.);

    assert!((pose.right_hand - Vec3::splat(0.5)).abs().max_element() < 1e-6);
    assert_eq!(pose.left_hand, Vec3::ZERO);
    assert!(!pose.idle);
}

#[test]
fn no_active_segment_means_idle() {
    let player = player(gapped());

    for time in [0., 0.5, 2.5, 2.99, 4.01, 10.] {
        let pose = player.pose_at(time);
        assert!(pose.idle, "expected idle at {time}");
        assert_eq!(pose, player.idle_pose());
    }
}

#[test]
fn keyframe_times_reproduce_keyframes() {
    let timeline = gapped();
    let player = player(timeline.clone());

    for keyframe in timeline.signs.iter().flat_map(|segment| &segment.keyframes) {
        let pose = player.pose_at(keyframe.time);
        assert_eq!(pose.right_hand, keyframe.right_hand);
        assert_eq!(pose.left_hand, keyframe.left_hand);
    }
}

#[test]
fn single_keyframe_holds_for_the_whole_segment() {
    let player = player(AnimationTimeline::new(
        vec![segment(
            "hold",
            0.,
            2.,
            vec![Keyframe::new(1., [0.25, 0.75, -0.5], [-0.3, 0.6, 0.1])],
        )],
        2.,
    ));

    for time in [0., 1., 2.] {
        let pose = player.pose_at(time);
        assert_eq!(pose.right_hand, Vec3::new(0.25, 0.75, -0.5));
        assert_eq!(pose.left_hand, Vec3::new(-0.3, 0.6, 0.1));
    }
}

#[test]
fn keyframes_closer_than_a_microsecond() {
    let player = player(AnimationTimeline::new(
        vec![segment(
            "flick",
            0.,
            2.,
            vec![
                Keyframe::new(1., [0.; 3], [0.; 3]),
                Keyframe::new(1.0000001, [1.; 3], [0.5; 3]),
            ],
        )],
        2.,
    ));

    assert_eq!(player.pose_at(1.).right_hand, Vec3::ZERO);

    let pose = player.pose_at(1.0000001);
    assert_eq!(pose.right_hand, Vec3::ONE);
    assert_eq!(pose.left_hand, Vec3::splat(0.5));
}

#[test]
fn completion_fires_once() {
    let fired = Rc::new(Cell::new(0));
    let mut player = player(hello());

    let counter = fired.clone();
    player.on_complete(move |_| counter.set(counter.get() + 1));

    player.play();
    for _ in 0..4 {
        player.tick(0.7);
    }

    assert_eq!(fired.get(), 1);
}

#[test]
fn ticking_past_the_end() {
    let mut player = player(hello());
    player.play();

    let mut completed_on = None;
    let mut time_at_completion = 0.;

    for call in 1..=25 {
        player.tick(0.1);

        if player.is_complete() && completed_on.is_none() {
            completed_on = Some(call);
            time_at_completion = player.current_time();
        }
    }

    assert!(completed_on.unwrap() <= 20);
    assert_eq!(player.current_time(), time_at_completion);
    assert!(!player.is_playing());
}

#[test]
fn restart_after_completion_fires_again() {
    let fired = Rc::new(Cell::new(0));
    let mut player = player(hello());

    let counter = fired.clone();
    player.on_complete(move |_| counter.set(counter.get() + 1));

    player.play();
    player.tick(2.5);
    player.play();
    assert!(!player.is_complete());
    assert_eq!(player.current_time(), 0.);

    player.tick(2.5);
    assert_eq!(fired.get(), 2);
}

#[test]
fn malformed_timelines_degrade_to_idle() {
    let player = player(AnimationTimeline::new(
        vec![
            segment("empty", 0., 1., vec![]),
            segment("zero", 2., 2., vec![Keyframe::new(2., [0.5; 3], [0.; 3])]),
        ],
        f32::NAN,
    ));

    assert!(player.pose_at(0.5).idle);
    assert_eq!(player.pose_at(2.).right_hand, Vec3::splat(0.5));
}

#[test]
fn nan_duration_completes_immediately() {
    let mut player = player(AnimationTimeline::new(vec![], f32::NAN));
    player.play();
    player.tick(0.016);

    assert!(player.is_complete());
    assert_eq!(player.current_time(), 0.);
}

#[test]
fn caption_follows_the_clock() {
    let mut player = player(SignLibrary::default().compose(&["hello", "thank_you"]));
    player.play();

    player.tick(0.5);
    assert_eq!(player.active_sign(), Some("hello"));

    player.tick(0.6);
    assert_eq!(player.active_sign(), None);

    player.tick(0.5);
    assert_eq!(player.active_sign(), Some("thank_you"));
}

#[test]
fn pose_follows_hands() {
    let rig = RigConfig::default();
    let pose = player(gapped()).pose_at(2.);

    let average_x = (0.4 + -0.1) / 2.;
    assert!((pose.rotations.right_arm_z - (-0.4 * rig.arm_swing.gain + rig.arm_swing.right_offset)).abs() < 1e-6);
    assert!((pose.rotations.left_arm_z - (0.1 * rig.arm_swing.gain + rig.arm_swing.left_offset)).abs() < 1e-6);
    assert!((pose.rotations.torso_y - average_x * rig.torso_follow.rotation_gain).abs() < 1e-6);
}

proptest! {
    #[test]
    fn pose_at_is_idempotent(time in -1.0f32..6.0) {
        let player = player(gapped());
        prop_assert_eq!(player.pose_at(time), player.pose_at(time));
    }

    #[test]
    fn signed_poses_stay_between_keyframes(time in 1.0f32..=2.0) {
        let pose = player(gapped()).pose_at(time);

        let low = Vec3::new(0.1, 0.2, 0.3);
        let high = Vec3::new(0.4, 0.5, 0.6);
        prop_assert!(pose.right_hand.cmpge(low - 1e-6).all());
        prop_assert!(pose.right_hand.cmple(high + 1e-6).all());
    }
}

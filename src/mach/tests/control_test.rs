use super::*;
use crate::error;
use crate::mach::Event;

#[test]
fn test_if_elseif_else() {
    let mut r = runtime(
        r#"
        $i = 0;
        while $i < 3 {
            if $i == 0 { print "zero "; }
            elseif $i == 1 { print "one "; }
            else { print "many "; }
            inc $i;
        }
        "#,
    );
    assert_eq!(run(&mut r), "zero one many ");
}

#[test]
fn test_repeat_runs_once() {
    let mut r = runtime(r#"$n = 9; repeat { print $n; inc $n; } until $n > 0;"#);
    assert_eq!(run(&mut r), "9");
}

#[test]
fn test_forward_goto() {
    let mut r = runtime(r#"goto @skip; print "no"; @skip: print "yes";"#);
    assert_eq!(run(&mut r), "yes");
}

#[test]
fn test_backward_goto_loop() {
    let mut r = runtime(
        r#"
        $i = 3;
        @top:
        print $i;
        dec $i;
        if $i > 0 { goto @top; }
        "#,
    );
    assert_eq!(run(&mut r), "321");
}

#[test]
fn test_undefined_label() {
    let mut r = runtime(r#"goto @nowhere;"#);
    assert_eq!(run(&mut r), "undefined label in goto; @nowhere\n");
}

#[test]
fn test_condition_must_be_bool() {
    let mut r = runtime(r#"while 1 { }"#);
    assert_eq!(run(&mut r), "type mismatch in jump; condition is int\n");
}

#[test]
fn test_cycle_budget() {
    let mut r = runtime(r#"@l: goto @l;"#);
    assert_eq!(r.execute(10), Event::Running);
    assert!(r.is_running());
    r.interrupt();
    assert_eq!(r.execute(10), Event::Error(error!(Interrupted)));
    assert_eq!(r.execute(10), Event::Stopped);
}

#[test]
fn test_runs_to_completion() {
    let mut r = runtime(r#"$i = 0; while $i < 100 { inc $i; } print $i;"#);
    assert_eq!(run(&mut r), "100");
    assert!(!r.is_running());
}

#[test]
fn test_scan_round_trip() {
    let mut r = runtime(r#"scan $name; print "hi ", $name, endl;"#);
    assert_eq!(r.execute(100), Event::Input);
    assert_eq!(r.execute(100), Event::Input);
    r.enter("bob\n");
    assert_eq!(run(&mut r), "hi bob\n");
}

#[test]
fn test_scan_aborted() {
    let mut r = runtime(r#"scan $a[2]; print "never";"#);
    assert_eq!(r.execute(100), Event::Input);
    r.abort(error!(InputError; "end of input"));
    assert_eq!(run(&mut r), "input error; end of input\n");
}

#[test]
fn test_scan_out_of_bounds() {
    let mut r = runtime(r#"scan $a[2]; print "never";"#);
    assert_eq!(r.execute(100), Event::Input);
    r.enter("x");
    assert_eq!(
        run(&mut r),
        "index out of bounds in scan; index 2 with length 1\n"
    );
}

#[test]
fn test_endless_loop_reported() {
    let mut r = runtime(r#"@l: goto @l;"#);
    assert_eq!(run_cycles(&mut r, 50), "\n50 execution cycles exceeded\n");
}

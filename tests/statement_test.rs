mod common;
use common::*;

#[test]
fn test_assign_and_print() {
    assert_eq!(exec("$x[0] = 5; print $x[0], endl;"), "5\n");
}

#[test]
fn test_division_by_zero_prints_nothing() {
    assert_eq!(
        exec(r#"print "before"; $y[0] = 10 / 0; print "after";"#),
        "beforedivision by zero in /\n"
    );
    assert_eq!(exec("$y[0] = 10 / 0;"), "division by zero in /\n");
}

#[test]
fn test_while_sum() {
    assert_eq!(
        exec("$i[0]=0; $s[0]=0; while($i[0]<5){ $s[0]=$s[0]+$i[0]; inc $i[0]; } print $s[0];"),
        "10"
    );
}

#[test]
fn test_duplicate_label_runs_nothing() {
    assert_eq!(
        exec(r#"print "x"; @l: @l:"#),
        "duplicate label in line 3 at `@l`\n"
    );
}

#[test]
fn test_type_mismatch_names_operator() {
    assert_eq!(exec("print true + 1;"), "type mismatch in +; bool and int\n");
}

#[test]
fn test_print_separators() {
    assert_eq!(exec(r#"print 1, 2.5, true, "s";"#), "12.500000trues");
    assert_eq!(exec(r#"print endl, endl;"#), "\n\n");
}

#[test]
fn test_scan_lines() {
    assert_eq!(
        exec_with_input(
            r#"scan $a; scan $b; print $b, $a;"#,
            &["first\n", "second"]
        ),
        "secondfirst"
    );
    assert_eq!(
        exec_with_input(r#"scan $n; print int($n) * 2;"#, &["21\n"]),
        "42"
    );
}

#[test]
fn test_bubble_sort() {
    assert_eq!(
        exec(
            r#"
            alloc $a, 5;
            $a[0] = 4; $a[1] = 1; $a[2] = 5; $a[3] = 2; $a[4] = 3;
            $swapped = true;
            while $swapped {
                $swapped = false;
                $i = 1;
                while $i < 5 {
                    if $a[$i - 1] > $a[$i] {
                        $t = $a[$i];
                        $a[$i] = $a[$i - 1];
                        $a[$i - 1] = $t;
                        $swapped = true;
                    }
                    inc $i;
                }
            }
            $i = 0;
            repeat { print $a[$i], " "; inc $i; } until $i == 5
            "#
        ),
        "1 2 3 4 5 "
    );
}

#[test]
fn test_nested_if() {
    let body = r#"
        $n = 0;
        while $n < 16 {
            inc $n;
            if $n % 15 == 0 { print "fb "; }
            elseif $n % 5 == 0 { print "b "; }
            elseif $n % 3 == 0 { print "f "; }
            else { print $n, " "; }
        }
    "#;
    assert_eq!(
        exec(body),
        "1 2 f 4 b f 7 8 f b 11 f 13 14 fb 16 "
    );
}

#[test]
fn test_goto_out_of_loop() {
    assert_eq!(
        exec(
            r#"
            $i = 0;
            while true {
                inc $i;
                if $i == 3 { goto @done; }
            }
            @done:
            print $i;
            "#
        ),
        "3"
    );
}

#[test]
fn test_infinite_loop_detected() {
    assert_eq!(exec("while true { }"), "\nexecution cycles exceeded\n");
}

#[test]
fn test_comments_ignored() {
    assert_eq!(
        exec("# a comment\nprint 1; # trailing\n# print 2;\nprint 3;"),
        "13"
    );
}

mod common;
use common::*;

#[test]
fn test_casts() {
    assert_eq!(exec(r#"print int("42abc") + 1;"#), "43");
    assert_eq!(exec(r#"print int("abc");"#), "0");
    assert_eq!(exec(r#"print int(3.9), " ", int(-3.9);"#), "3 -3");
    assert_eq!(exec(r#"print double("2.5") * 2.0;"#), "5.000000");
    assert_eq!(exec(r#"print bool("true"), bool("yes"), bool(0), bool(2.5);"#), "truefalsefalsetrue");
    assert_eq!(exec(r#"print string(1) + string(true);"#), "1true");
    assert_eq!(exec(r#"print int(true) + int(false);"#), "1");
}

#[test]
fn test_rounding_keeps_integers() {
    assert_eq!(exec("print ?floor(7), \" \", ?floor(7.5);"), "7 7.000000");
    assert_eq!(exec("print ?ceil(7.2), \" \", ?round(2.5), \" \", ?trunc(-2.7);"), "8.000000 3.000000 -2.000000");
    assert_eq!(exec("print ?abs(-3), \" \", ?abs(-2.5);"), "3 2.500000");
    assert_eq!(exec("print ?max(3, 9), \" \", ?min(3, 9.5);"), "9 3.000000");
}

#[test]
fn test_real_functions() {
    assert_eq!(exec("print ?sqrt(16);"), "4.000000");
    assert_eq!(exec("print ?pow(2, 10);"), "1024.000000");
    assert_eq!(exec("print ?exp(0), \" \", ?log(1);"), "1.000000 0.000000");
    assert_eq!(exec("print ?log(0), \" \", ?exp(1000);"), "-inf inf");
    assert_eq!(
        exec(r#"$n = string(?pow(-1, 0.5)); print $n == "nan" | $n == "-nan";"#),
        "true"
    );
    assert_eq!(exec("print ?sin(0.0) + ?cos(0.0);"), "1.000000");
    assert_eq!(exec("print ?atan2(0, 1), \" \", ?tan(0);"), "0.000000 0.000000");
    assert_eq!(
        exec("print ?asin(0), \" \", ?acos(1), \" \", ?atan(0);"),
        "0.000000 0.000000 0.000000"
    );
    assert_eq!(
        exec(r#"print ?sqrt("4");"#),
        "type mismatch in ?sqrt; numeric operand expected, found string\n"
    );
}

#[test]
fn test_rand() {
    let out = exec(
        r#"
        $i = 0;
        while $i < 50 {
            $r = ?rand(3);
            if $r < 0 | $r > 3 { print "bad"; }
            inc $i;
        }
        print ?rand(0);
        "#,
    );
    assert_eq!(out, "0");
    assert_eq!(
        exec("print ?rand(-1);"),
        "illegal function call in ?rand; operand must be >= 0\n"
    );
}

#[test]
fn test_rand_is_seeded() {
    let body = "print ?rand(1000000), \" \", ?rand(1000000);";
    assert_eq!(exec(body), exec(body));
}

#[test]
fn test_unknown_function() {
    assert_eq!(
        exec("print ?frobnicate(1);"),
        "unknown function in line 3 at `?frobnicate`\n"
    );
}

#[test]
fn test_wrong_arguments() {
    assert_eq!(
        exec("print ?pow(2);"),
        "wrong number of arguments in line 3 at `?pow`; ?pow takes 2, found 1\n"
    );
    assert_eq!(
        exec("print int();"),
        "wrong number of arguments in line 3 at `int`; int takes 1, found 0\n"
    );
}

//! Common DRLX sources for tests.

pub const EMPTY: &str = "";

pub const RULE_HEADER: &str = "rule ";

pub const SYSTEM_MEMBER_ACCESS: &str = "rule R1 {\n    do { System.";

pub const UNKNOWN_SCOPE: &str = "rule R1 {\n    do { foo.";

pub const PERSON_MODEL: &str = r#"package org.example;

import java.util.List;

public class Person {
    private String name;
    public int age;
    public List children;

    public String getName() { return name; }
    public boolean isAdult() { return age >= 18; }
}
"#;

pub const ORDER_RULE: &str = r#"package org.example;

rule HighValueOrders {
    var o : /orders[ total > 100 ],
    do {
        System.out.println(o);
    }
}
"#;

/// Sources the parser must round-trip and tolerate.
pub const WELL_FORMED: &[&str] = &[PERSON_MODEL, ORDER_RULE];

pub const MALFORMED: &[&str] = &[
    ") } ] ;; # @ . -> class { rule { do { ( ",
    "rule R1 { var a : /as[ , do { x = ; } ",
    "class { int [ = new ; } rule",
    "@",
    ".",
];

//! Integration tests for whole-program checking.
//!
//! These tests build complete programs the way the parser would hand
//! them over and run them through `type_check`.

use static_checker::{
    ast::{
        ast::{FunDef, Program, Stmt, StructDef},
        expressions::{CallExpr, Expr, RValue, VarRef},
        statements::{AssignStmt, BasicIf, ForStmt, IfStmt, ReturnStmt, VarDeclStmt, WhileStmt},
        types::{DataType, VarDef},
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{Token, TokenKind},
    render_error, type_check, Position, MK_TOKEN,
};

fn id_at(name: &str, line: u32, column: u32) -> Token {
    MK_TOKEN!(TokenKind::Id, name, line, column)
}

fn id(name: &str) -> Token {
    id_at(name, 1, 1)
}

fn int(value: i64) -> Expr {
    Expr::value(RValue::literal(MK_TOKEN!(TokenKind::IntVal, value.to_string(), 1, 1)))
}

fn string(text: &str) -> Expr {
    Expr::value(RValue::literal(MK_TOKEN!(TokenKind::StringVal, text, 1, 1)))
}

fn null() -> Expr {
    Expr::value(RValue::literal(MK_TOKEN!(TokenKind::NullVal, "null", 1, 1)))
}

fn var(name: &str) -> Expr {
    Expr::value(RValue::var(vec![VarRef::name(id(name))]))
}

fn binary(lhs: Expr, kind: TokenKind, lexeme: &str, rhs: Expr) -> Expr {
    Expr::binary(lhs, MK_TOKEN!(kind, lexeme, 1, 1), rhs)
}

fn call(name: &str, args: Vec<Expr>) -> CallExpr {
    CallExpr {
        fun_name: id(name),
        args,
    }
}

fn decl(data_type: DataType, name: &str, expr: Expr) -> VarDeclStmt {
    VarDeclStmt {
        var_def: VarDef::new(id(name), data_type),
        expr,
    }
}

fn fun(return_type: DataType, name: Token, params: Vec<VarDef>, stmts: Vec<Stmt>) -> FunDef {
    FunDef {
        return_type,
        fun_name: name,
        params,
        stmts,
    }
}

fn main_with(stmts: Vec<Stmt>) -> FunDef {
    fun(DataType::void(), id("main"), vec![], stmts)
}

fn point() -> StructDef {
    StructDef {
        struct_name: id("Point"),
        fields: vec![
            VarDef::new(id("x"), DataType::scalar("int")),
            VarDef::new(id("y"), DataType::scalar("int")),
        ],
    }
}

fn check_err(program: &Program) -> Error {
    type_check(program).expect_err("program should be rejected")
}

/// struct Point { int x; int y; }
/// struct Polygon { Point[] corners; Polygon next; }
///
/// int area(Polygon poly) { ... }
/// void main() { ... }
fn well_typed_program() -> Program {
    let polygon = StructDef {
        struct_name: id("Polygon"),
        fields: vec![
            VarDef::new(id("corners"), DataType::array("Point")),
            VarDef::new(id("next"), DataType::scalar("Polygon")),
        ],
    };

    let area = fun(
        DataType::scalar("int"),
        id("area"),
        vec![VarDef::new(id("poly"), DataType::scalar("Polygon"))],
        vec![
            decl(DataType::scalar("int"), "total", int(0)).into(),
            ForStmt {
                var_decl: decl(DataType::scalar("int"), "i", int(0)),
                condition: binary(
                    var("i"),
                    TokenKind::Less,
                    "<",
                    Expr::value(RValue::call(
                        id("length"),
                        vec![Expr::value(RValue::var(vec![
                            VarRef::name(id("poly")),
                            VarRef::name(id("corners")),
                        ]))],
                    )),
                ),
                assign_stmt: AssignStmt {
                    lvalue: vec![VarRef::name(id("i"))],
                    expr: binary(var("i"), TokenKind::Plus, "+", int(1)),
                },
                stmts: vec![AssignStmt {
                    lvalue: vec![VarRef::name(id("total"))],
                    expr: binary(
                        var("total"),
                        TokenKind::Plus,
                        "+",
                        Expr::value(RValue::var(vec![
                            VarRef::name(id("poly")),
                            VarRef::indexed(id("corners"), var("i")),
                            VarRef::name(id("x")),
                        ])),
                    ),
                }
                .into()],
            }
            .into(),
            ReturnStmt { expr: var("total") }.into(),
        ],
    );

    let main = main_with(vec![
        decl(DataType::scalar("Polygon"), "poly", Expr::value(RValue::new_object(id("Polygon"))))
            .into(),
        AssignStmt {
            lvalue: vec![VarRef::name(id("poly")), VarRef::name(id("corners"))],
            expr: Expr::value(RValue::new_array(id("Point"), int(4))),
        }
        .into(),
        AssignStmt {
            lvalue: vec![VarRef::name(id("poly")), VarRef::name(id("next"))],
            expr: Expr::value(RValue::new_object(id("Polygon"))),
        }
        .into(),
        IfStmt {
            if_part: BasicIf {
                condition: binary(
                    Expr::value(RValue::var(vec![
                        VarRef::name(id("poly")),
                        VarRef::name(id("next")),
                    ])),
                    TokenKind::NotEqual,
                    "!=",
                    null(),
                ),
                stmts: vec![call("print", vec![string("linked")]).into()],
            },
            else_ifs: vec![],
            else_stmts: vec![call("print", vec![string("alone")]).into()],
        }
        .into(),
        decl(
            DataType::scalar("string"),
            "name",
            Expr::value(RValue::call(id("input"), vec![])),
        )
        .into(),
        WhileStmt {
            condition: binary(
                Expr::value(RValue::call(id("length"), vec![var("name")])),
                TokenKind::Greater,
                ">",
                int(0),
            ),
            stmts: vec![AssignStmt {
                lvalue: vec![VarRef::name(id("name"))],
                expr: Expr::value(RValue::call(id("input"), vec![])),
            }
            .into()],
        }
        .into(),
        call(
            "print",
            vec![Expr::value(RValue::call(
                id("to_string"),
                vec![Expr::value(RValue::call(id("area"), vec![var("poly")]))],
            ))],
        )
        .into(),
    ]);

    // main is registered before its callees are; order must not matter
    Program {
        struct_defs: vec![polygon, point()],
        fun_defs: vec![main, area],
    }
}

#[test]
fn test_well_typed_program_passes() {
    assert_eq!(type_check(&well_typed_program()), Ok(()));
}

#[test]
fn test_checking_twice_is_independent() {
    let program = well_typed_program();

    assert!(type_check(&program).is_ok());
    assert!(type_check(&program).is_ok());
}

#[test]
fn test_missing_main() {
    let program = Program {
        struct_defs: vec![],
        fun_defs: vec![fun(DataType::void(), id("helper"), vec![], vec![])],
    };

    let error = check_err(&program);
    assert_eq!(error.get_internal_error(), &ErrorImpl::MissingMain);
    assert_eq!(error.to_string(), "program missing main function");
}

#[test]
fn test_main_must_return_void() {
    let program = Program {
        struct_defs: vec![],
        fun_defs: vec![fun(DataType::scalar("int"), id_at("main", 2, 5), vec![], vec![])],
    };

    let error = check_err(&program);
    assert_eq!(
        error.to_string(),
        "main function must have void type near line 2, column 5"
    );
}

#[test]
fn test_main_cannot_have_parameters() {
    let program = Program {
        struct_defs: vec![],
        fun_defs: vec![fun(
            DataType::void(),
            id("main"),
            vec![VarDef::new(id_at("argc", 1, 15), DataType::scalar("int"))],
            vec![],
        )],
    };

    let error = check_err(&program);
    assert_eq!(error.get_internal_error(), &ErrorImpl::MainHasParameters);
    assert_eq!(error.get_position(), Some(&Position { line: 1, column: 15 }));
}

#[test]
fn test_duplicate_struct() {
    let program = Program {
        struct_defs: vec![point(), StructDef {
            struct_name: id_at("Point", 9, 8),
            fields: vec![],
        }],
        fun_defs: vec![main_with(vec![])],
    };

    assert_eq!(
        check_err(&program).to_string(),
        "multiple definitions of 'Point' near line 9, column 8"
    );
}

#[test]
fn test_duplicate_function() {
    let program = Program {
        struct_defs: vec![],
        fun_defs: vec![
            main_with(vec![]),
            fun(DataType::void(), id("f"), vec![], vec![]),
            fun(DataType::scalar("int"), id("f"), vec![], vec![]),
        ],
    };

    assert_eq!(
        check_err(&program).get_internal_error(),
        &ErrorImpl::MultipleDefinitions {
            name: "f".to_string()
        }
    );
}

#[test]
fn test_builtin_names_are_reserved() {
    for name in ["print", "input", "to_string", "to_int", "to_double", "length", "get", "concat"] {
        let program = Program {
            struct_defs: vec![],
            fun_defs: vec![main_with(vec![]), fun(DataType::void(), id(name), vec![], vec![])],
        };

        assert_eq!(
            check_err(&program).get_internal_error(),
            &ErrorImpl::RedefiningBuiltIn {
                name: name.to_string()
            }
        );
    }
}

#[test]
fn test_duplicate_field_and_parameter() {
    let program = Program {
        struct_defs: vec![StructDef {
            struct_name: id("Pair"),
            fields: vec![
                VarDef::new(id("a"), DataType::scalar("int")),
                VarDef::new(id("a"), DataType::scalar("double")),
            ],
        }],
        fun_defs: vec![main_with(vec![])],
    };
    assert_eq!(check_err(&program).get_error_name(), "FieldAlreadyDeclared");

    let program = Program {
        struct_defs: vec![],
        fun_defs: vec![
            main_with(vec![]),
            fun(
                DataType::void(),
                id("f"),
                vec![
                    VarDef::new(id("a"), DataType::scalar("int")),
                    VarDef::new(id("a"), DataType::scalar("int")),
                ],
                vec![],
            ),
        ],
    };
    assert_eq!(check_err(&program).get_error_name(), "ParameterAlreadyDeclared");
}

#[test]
fn test_struct_forward_and_self_references() {
    let program = Program {
        struct_defs: vec![
            StructDef {
                struct_name: id("Tree"),
                fields: vec![
                    VarDef::new(id("root"), DataType::scalar("Node")),
                    VarDef::new(id("size"), DataType::scalar("int")),
                ],
            },
            StructDef {
                struct_name: id("Node"),
                fields: vec![
                    VarDef::new(id("value"), DataType::scalar("int")),
                    VarDef::new(id("children"), DataType::array("Node")),
                ],
            },
        ],
        fun_defs: vec![main_with(vec![])],
    };

    assert!(type_check(&program).is_ok());
}

#[test]
fn test_struct_return_type_rejected() {
    let program = Program {
        struct_defs: vec![point()],
        fun_defs: vec![
            main_with(vec![]),
            fun(
                DataType::scalar("Point"),
                id("origin"),
                vec![],
                vec![ReturnStmt {
                    expr: Expr::value(RValue::new_object(id("Point"))),
                }
                .into()],
            ),
        ],
    };

    assert_eq!(check_err(&program).get_error_name(), "InvalidReturnType");
}

#[test]
fn test_names_do_not_outlive_their_block() {
    let program = Program {
        struct_defs: vec![],
        fun_defs: vec![main_with(vec![
            IfStmt {
                if_part: BasicIf {
                    condition: Expr::value(RValue::literal(MK_TOKEN!(TokenKind::BoolVal, "true"))),
                    stmts: vec![decl(DataType::scalar("int"), "inner", int(1)).into()],
                },
                else_ifs: vec![],
                else_stmts: vec![],
            }
            .into(),
            call("print", vec![var("inner")]).into(),
        ])],
    };

    assert_eq!(
        check_err(&program).get_internal_error(),
        &ErrorImpl::VariableNotDeclared {
            variable: "inner".to_string()
        }
    );
}

#[test]
fn test_loop_variable_does_not_outlive_loop() {
    let for_loop: Stmt = ForStmt {
        var_decl: decl(DataType::scalar("int"), "i", int(0)),
        condition: binary(var("i"), TokenKind::Less, "<", int(3)),
        assign_stmt: AssignStmt {
            lvalue: vec![VarRef::name(id("i"))],
            expr: binary(var("i"), TokenKind::Plus, "+", int(1)),
        },
        stmts: vec![],
    }
    .into();

    let reuse = main_with(vec![
        for_loop.clone(),
        decl(DataType::scalar("string"), "i", string("again")).into(),
    ]);
    assert!(type_check(&Program {
        struct_defs: vec![],
        fun_defs: vec![reuse],
    })
    .is_ok());

    let leak = main_with(vec![for_loop, call("print", vec![var("i")]).into()]);
    assert_eq!(
        check_err(&Program {
            struct_defs: vec![],
            fun_defs: vec![leak],
        })
        .get_error_name(),
        "VariableNotDeclared"
    );
}

#[test]
fn test_user_call_rules() {
    let f = fun(
        DataType::scalar("string"),
        id("f"),
        vec![VarDef::new(id("x"), DataType::scalar("int"))],
        vec![ReturnStmt {
            expr: Expr::value(RValue::call(id("to_string"), vec![var("x")])),
        }
        .into()],
    );

    let good = main_with(vec![decl(
        DataType::scalar("string"),
        "s",
        Expr::value(RValue::call(id("f"), vec![int(3)])),
    )
    .into()]);
    assert!(type_check(&Program {
        struct_defs: vec![],
        fun_defs: vec![good, f.clone()],
    })
    .is_ok());

    let bad = main_with(vec![call(
        "f",
        vec![Expr::value(RValue::literal(MK_TOKEN!(TokenKind::DoubleVal, "3.0")))],
    )
    .into()]);
    assert_eq!(
        check_err(&Program {
            struct_defs: vec![],
            fun_defs: vec![bad, f],
        })
        .get_error_name(),
        "ArgumentTypeMatchError"
    );
}

#[test]
fn test_unknown_field_in_program() {
    let program = Program {
        struct_defs: vec![point()],
        fun_defs: vec![main_with(vec![
            decl(DataType::scalar("Point"), "p", Expr::value(RValue::new_object(id("Point"))))
                .into(),
            decl(DataType::scalar("int"), "a", Expr::value(RValue::var(vec![
                VarRef::name(id("p")),
                VarRef::name(id("x")),
            ])))
            .into(),
            decl(DataType::scalar("int"), "b", Expr::value(RValue::var(vec![
                VarRef::name(id("p")),
                VarRef::name(id_at("z", 3, 11)),
            ])))
            .into(),
        ])],
    };

    assert_eq!(
        check_err(&program).to_string(),
        "unknown field 'z' in struct 'Point' near line 3, column 11"
    );
}

#[test]
fn test_render_error_points_at_source() {
    let source = "void main() {\n  int x = 1 + 2.0\n}\n";
    let program = Program {
        struct_defs: vec![],
        fun_defs: vec![main_with(vec![decl(
            DataType::scalar("int"),
            "x",
            Expr::binary(
                RValue::literal(MK_TOKEN!(TokenKind::IntVal, "1", 2, 11)),
                MK_TOKEN!(TokenKind::Plus, "+", 2, 13),
                Expr::value(RValue::literal(MK_TOKEN!(TokenKind::DoubleVal, "2.0", 2, 15))),
            ),
        )
        .into()])],
    };

    let error = check_err(&program);
    let rendered = render_error(&error, "shapes.lang", source);

    assert!(rendered.starts_with("Error: OperandTypeMatchError"));
    assert!(rendered.contains("-> shapes.lang:2:13"));
    assert!(rendered.contains("2 | int x = 1 + 2.0"));
    assert!(rendered.ends_with("  | ----------^\n"));
}

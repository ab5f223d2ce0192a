use crate::ast::{AstNode, BinaryOperator, UnaryOperator};
use crate::error::EvalError;
use log::debug;
use pest::iterators::Pair;
use pest::Parser;
use pest_derive::Parser;

#[derive(Parser)]
#[grammar = "./expression.pest"] // Link to the grammar file
pub struct ExprParser;

impl ExprParser {
    /// Parses an expression string into an AST.
    ///
    /// Note that `^` is bitwise xor here; a caller that wants `^` to mean
    /// exponentiation must substitute it for `**` before parsing (the
    /// Newton solver does).
    pub fn parse_expression(input: &str) -> Result<AstNode, EvalError> {
        debug!("parsing expression: {}", input);
        let parse_result = ExprParser::parse(Rule::expression, input)
            .map_err(|e| EvalError::Syntax(e.to_string()))?
            .next()
            .ok_or_else(|| EvalError::Syntax("failed to parse expression".to_string()))?;

        Self::build_expression(parse_result)
    }

    fn build_expression(pair: Pair<Rule>) -> Result<AstNode, EvalError> {
        let mut pairs = pair.into_inner();
        Self::build_bitwise_expression(pairs.next().unwrap())
    }

    fn build_bitwise_expression(pair: Pair<Rule>) -> Result<AstNode, EvalError> {
        let mut pairs = pair.into_inner();
        let mut node = Self::build_additive_expression(pairs.next().unwrap())?;

        while let Some(operator_pair) = pairs.next() {
            let operator = BinaryOperator::try_from(operator_pair.as_str())?;
            let right = Self::build_additive_expression(pairs.next().unwrap())?;
            node = AstNode::BinaryOperation {
                left: Box::new(node),
                operator,
                right: Box::new(right),
            };
        }

        Ok(node)
    }

    fn build_additive_expression(pair: Pair<Rule>) -> Result<AstNode, EvalError> {
        let mut pairs = pair.into_inner();
        let mut node = Self::build_term(pairs.next().unwrap())?;

        while let Some(operator_pair) = pairs.next() {
            let operator = BinaryOperator::try_from(operator_pair.as_str())?;
            let right = Self::build_term(pairs.next().unwrap())?;
            node = AstNode::BinaryOperation {
                left: Box::new(node),
                operator,
                right: Box::new(right),
            };
        }

        Ok(node)
    }

    fn build_term(pair: Pair<Rule>) -> Result<AstNode, EvalError> {
        let mut pairs = pair.into_inner();
        let mut node = Self::build_unary_expression(pairs.next().unwrap())?;

        while let Some(operator_pair) = pairs.next() {
            let operator = BinaryOperator::try_from(operator_pair.as_str())?;
            let right = Self::build_unary_expression(pairs.next().unwrap())?;
            node = AstNode::BinaryOperation {
                left: Box::new(node),
                operator,
                right: Box::new(right),
            };
        }

        Ok(node)
    }

    fn build_unary_expression(pair: Pair<Rule>) -> Result<AstNode, EvalError> {
        let mut pairs = pair.into_inner();
        let first = pairs.next().unwrap();
        match first.as_rule() {
            Rule::PLUS | Rule::MINUS => {
                let operator = if first.as_rule() == Rule::MINUS {
                    UnaryOperator::Negate
                } else {
                    UnaryOperator::Identity
                };
                let operand = Self::build_unary_expression(pairs.next().unwrap())?;
                Ok(AstNode::UnaryOperation {
                    operator,
                    operand: Box::new(operand),
                })
            }
            Rule::power => Self::build_power(first),
            _ => Err(EvalError::Syntax(format!(
                "unexpected rule in unary expression: {:?}",
                first.as_rule()
            ))),
        }
    }

    fn build_power(pair: Pair<Rule>) -> Result<AstNode, EvalError> {
        let mut pairs = pair.into_inner();
        let base = Self::build_postfix_expression(pairs.next().unwrap())?;

        // The exponent re-enters the unary tier, which makes `**`
        // right-associative.
        if pairs.next().is_some() {
            let exponent = Self::build_unary_expression(pairs.next().unwrap())?;
            Ok(AstNode::BinaryOperation {
                left: Box::new(base),
                operator: BinaryOperator::Power,
                right: Box::new(exponent),
            })
        } else {
            Ok(base)
        }
    }

    fn build_postfix_expression(pair: Pair<Rule>) -> Result<AstNode, EvalError> {
        let mut pairs = pair.into_inner();
        let mut node = Self::build_primary_expression(pairs.next().unwrap())?;

        for suffix in pairs {
            node = match suffix.as_rule() {
                Rule::call_suffix => {
                    let (args, kwargs) = Self::build_argument_list(suffix)?;
                    AstNode::FunctionCall {
                        callee: Box::new(node),
                        args,
                        kwargs,
                    }
                }
                Rule::attribute_suffix => {
                    let attribute = suffix.into_inner().next().unwrap().as_str().to_string();
                    AstNode::AttributeAccess {
                        target: Box::new(node),
                        attribute,
                    }
                }
                _ => {
                    return Err(EvalError::Syntax(format!(
                        "unexpected postfix rule: {:?}",
                        suffix.as_rule()
                    )))
                }
            };
        }

        Ok(node)
    }

    fn build_argument_list(
        pair: Pair<Rule>,
    ) -> Result<(Vec<AstNode>, Vec<(String, AstNode)>), EvalError> {
        let mut positional = Vec::new();
        let mut keyword: Vec<(String, AstNode)> = Vec::new();

        if let Some(list) = pair.into_inner().next() {
            for argument in list.into_inner() {
                let inner = argument.into_inner().next().unwrap();
                match inner.as_rule() {
                    Rule::keyword_argument => {
                        let mut kw = inner.into_inner();
                        let name = kw.next().unwrap().as_str().to_string();
                        let value = Self::build_bitwise_expression(kw.next().unwrap())?;
                        if keyword.iter().any(|(existing, _)| *existing == name) {
                            return Err(EvalError::Syntax(format!(
                                "duplicate keyword argument '{}'",
                                name
                            )));
                        }
                        keyword.push((name, value));
                    }
                    Rule::bitwise_expression => {
                        if !keyword.is_empty() {
                            return Err(EvalError::Syntax(
                                "positional argument follows keyword argument".to_string(),
                            ));
                        }
                        positional.push(Self::build_bitwise_expression(inner)?);
                    }
                    _ => {
                        return Err(EvalError::Syntax(format!(
                            "unexpected argument rule: {:?}",
                            inner.as_rule()
                        )))
                    }
                }
            }
        }

        Ok((positional, keyword))
    }

    fn build_primary_expression(pair: Pair<Rule>) -> Result<AstNode, EvalError> {
        let inner = pair.into_inner().next().unwrap();
        match inner.as_rule() {
            Rule::number => {
                let literal = inner.as_str();
                literal
                    .parse::<f64>()
                    .map(AstNode::Number)
                    .map_err(|e| EvalError::Syntax(format!("bad number literal '{literal}': {e}")))
            }
            Rule::identifier => Ok(AstNode::Identifier(inner.as_str().to_string())),
            Rule::group => Self::build_bitwise_expression(inner.into_inner().next().unwrap()),
            _ => Err(EvalError::Syntax(format!(
                "unexpected rule in primary expression: {:?}",
                inner.as_rule()
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn number(n: f64) -> Box<AstNode> {
        Box::new(AstNode::Number(n))
    }

    fn identifier(name: &str) -> Box<AstNode> {
        Box::new(AstNode::Identifier(name.to_string()))
    }

    fn binary(left: AstNode, operator: BinaryOperator, right: AstNode) -> AstNode {
        AstNode::BinaryOperation {
            left: Box::new(left),
            operator,
            right: Box::new(right),
        }
    }

    #[test]
    fn test_multiplication_binds_tighter_than_addition() {
        let ast = ExprParser::parse_expression("2 + 3 * 4").unwrap();
        let expected = AstNode::BinaryOperation {
            left: number(2.0),
            operator: BinaryOperator::Add,
            right: Box::new(binary(
                AstNode::Number(3.0),
                BinaryOperator::Multiply,
                AstNode::Number(4.0),
            )),
        };
        assert_eq!(ast, expected);
    }

    #[test]
    fn test_power_is_right_associative() {
        let ast = ExprParser::parse_expression("2**3**2").unwrap();
        let expected = AstNode::BinaryOperation {
            left: number(2.0),
            operator: BinaryOperator::Power,
            right: Box::new(binary(
                AstNode::Number(3.0),
                BinaryOperator::Power,
                AstNode::Number(2.0),
            )),
        };
        assert_eq!(ast, expected);
    }

    #[test]
    fn test_unary_minus_binds_looser_than_power() {
        let ast = ExprParser::parse_expression("-2**2").unwrap();
        let expected = AstNode::UnaryOperation {
            operator: UnaryOperator::Negate,
            operand: Box::new(binary(
                AstNode::Number(2.0),
                BinaryOperator::Power,
                AstNode::Number(2.0),
            )),
        };
        assert_eq!(ast, expected);
    }

    #[test]
    fn test_negative_exponent() {
        let ast = ExprParser::parse_expression("2**-1").unwrap();
        let expected = AstNode::BinaryOperation {
            left: number(2.0),
            operator: BinaryOperator::Power,
            right: Box::new(AstNode::UnaryOperation {
                operator: UnaryOperator::Negate,
                operand: number(1.0),
            }),
        };
        assert_eq!(ast, expected);
    }

    #[test]
    fn test_floor_division_token() {
        let ast = ExprParser::parse_expression("7 // 2").unwrap();
        assert_eq!(
            ast,
            binary(
                AstNode::Number(7.0),
                BinaryOperator::FloorDivide,
                AstNode::Number(2.0)
            )
        );
    }

    #[test]
    fn test_caret_is_bitwise_xor() {
        let ast = ExprParser::parse_expression("x ^ 2").unwrap();
        assert_eq!(
            ast,
            AstNode::BinaryOperation {
                left: identifier("x"),
                operator: BinaryOperator::BitXor,
                right: number(2.0),
            }
        );
    }

    #[test]
    fn test_bitwise_tier_is_flat_and_left_associative() {
        let ast = ExprParser::parse_expression("1 | 2 ^ 3").unwrap();
        let expected = AstNode::BinaryOperation {
            left: Box::new(binary(
                AstNode::Number(1.0),
                BinaryOperator::BitOr,
                AstNode::Number(2.0),
            )),
            operator: BinaryOperator::BitXor,
            right: number(3.0),
        };
        assert_eq!(ast, expected);
    }

    #[test]
    fn test_bitwise_binds_looser_than_additive() {
        let ast = ExprParser::parse_expression("1 ^ 2 + 3").unwrap();
        let expected = AstNode::BinaryOperation {
            left: number(1.0),
            operator: BinaryOperator::BitXor,
            right: Box::new(binary(
                AstNode::Number(2.0),
                BinaryOperator::Add,
                AstNode::Number(3.0),
            )),
        };
        assert_eq!(ast, expected);
    }

    #[test]
    fn test_grouped_expression() {
        let ast = ExprParser::parse_expression("(2 + 3) * 4").unwrap();
        let expected = AstNode::BinaryOperation {
            left: Box::new(binary(
                AstNode::Number(2.0),
                BinaryOperator::Add,
                AstNode::Number(3.0),
            )),
            operator: BinaryOperator::Multiply,
            right: number(4.0),
        };
        assert_eq!(ast, expected);
    }

    #[test]
    fn test_number_literals() {
        assert_eq!(ExprParser::parse_expression("42").unwrap(), *number(42.0));
        assert_eq!(ExprParser::parse_expression("2.5").unwrap(), *number(2.5));
        assert_eq!(ExprParser::parse_expression(".5").unwrap(), *number(0.5));
        assert_eq!(ExprParser::parse_expression("1e3").unwrap(), *number(1000.0));
        assert_eq!(
            ExprParser::parse_expression("2.5e-1").unwrap(),
            *number(0.25)
        );
    }

    #[test]
    fn test_call_with_positional_arguments() {
        let ast = ExprParser::parse_expression("atan2(1, 0)").unwrap();
        let expected = AstNode::FunctionCall {
            callee: identifier("atan2"),
            args: vec![AstNode::Number(1.0), AstNode::Number(0.0)],
            kwargs: vec![],
        };
        assert_eq!(ast, expected);
    }

    #[test]
    fn test_call_with_keyword_argument() {
        let ast = ExprParser::parse_expression("log(8, base=2)").unwrap();
        let expected = AstNode::FunctionCall {
            callee: identifier("log"),
            args: vec![AstNode::Number(8.0)],
            kwargs: vec![("base".to_string(), AstNode::Number(2.0))],
        };
        assert_eq!(ast, expected);
    }

    #[test]
    fn test_call_no_arguments() {
        let ast = ExprParser::parse_expression("f()").unwrap();
        let expected = AstNode::FunctionCall {
            callee: identifier("f"),
            args: vec![],
            kwargs: vec![],
        };
        assert_eq!(ast, expected);
    }

    #[test]
    fn test_keyword_argument_value_is_an_expression() {
        let ast = ExprParser::parse_expression("log(x, base=2 + 2)").unwrap();
        let expected = AstNode::FunctionCall {
            callee: identifier("log"),
            args: vec![AstNode::Identifier("x".to_string())],
            kwargs: vec![(
                "base".to_string(),
                binary(
                    AstNode::Number(2.0),
                    BinaryOperator::Add,
                    AstNode::Number(2.0),
                ),
            )],
        };
        assert_eq!(ast, expected);
    }

    #[test]
    fn test_duplicate_keyword_argument_rejected() {
        let result = ExprParser::parse_expression("f(base=1, base=2)");
        assert!(matches!(result, Err(EvalError::Syntax(_))));
    }

    #[test]
    fn test_positional_after_keyword_rejected() {
        let result = ExprParser::parse_expression("f(base=1, 2)");
        assert!(matches!(result, Err(EvalError::Syntax(_))));
    }

    #[test]
    fn test_chained_attribute_access() {
        let ast = ExprParser::parse_expression("point.inner.x").unwrap();
        let expected = AstNode::AttributeAccess {
            target: Box::new(AstNode::AttributeAccess {
                target: identifier("point"),
                attribute: "inner".to_string(),
            }),
            attribute: "x".to_string(),
        };
        assert_eq!(ast, expected);
    }

    #[test]
    fn test_call_result_attribute() {
        let ast = ExprParser::parse_expression("stats(1).mean").unwrap();
        let expected = AstNode::AttributeAccess {
            target: Box::new(AstNode::FunctionCall {
                callee: identifier("stats"),
                args: vec![AstNode::Number(1.0)],
                kwargs: vec![],
            }),
            attribute: "mean".to_string(),
        };
        assert_eq!(ast, expected);
    }

    #[test]
    fn test_underscore_identifier_parses() {
        // Lexically fine; the reserved prefix is enforced at resolution.
        let ast = ExprParser::parse_expression("_secret").unwrap();
        assert_eq!(ast, AstNode::Identifier("_secret".to_string()));
    }

    #[test]
    fn test_excess_whitespace() {
        let ast = ExprParser::parse_expression("  2   +    3  ").unwrap();
        assert_eq!(
            ast,
            binary(
                AstNode::Number(2.0),
                BinaryOperator::Add,
                AstNode::Number(3.0)
            )
        );
    }

    #[test]
    fn test_invalid_syntax() {
        let inputs = vec![
            "",
            "2 +",
            "+ * 2",
            "2 ** ",
            "(2 + 3",
            "2 + 3)",
            "2 3",
            "f(1,",
            "point.",
            "2 @ 3",
            "1..5",
        ];

        for input in inputs {
            assert!(
                ExprParser::parse_expression(input).is_err(),
                "input '{}' should fail to parse, but it succeeded",
                input
            );
        }
    }

    #[test]
    fn test_large_expression() {
        let input = (0..100)
            .map(|i| format!("v{} * {}", i, i))
            .collect::<Vec<_>>()
            .join(" + ");
        let ast = ExprParser::parse_expression(&input).unwrap();

        let mut expected = binary(
            AstNode::Identifier("v0".to_string()),
            BinaryOperator::Multiply,
            AstNode::Number(0.0),
        );
        for i in 1..100 {
            expected = binary(
                expected,
                BinaryOperator::Add,
                binary(
                    AstNode::Identifier(format!("v{}", i)),
                    BinaryOperator::Multiply,
                    AstNode::Number(i as f64),
                ),
            );
        }

        assert_eq!(ast, expected);
    }
}

/*!
# The Script Language

A script is one block of statements wrapped in a fixed header and footer.
Run it with `rpn script.rpn`.

```text
program "hello";
begin {
    # comments run to the end of the line
    $name = "world";
    print "hello ", $name, endl;
} end
```

## Names

Every name carries a sigil. `$name` is a variable, `?name` is a built-in
function and `@name` is a label. Names are ASCII letters, digits and
underbars after the sigil. Keywords are lowercase and reserved.

A name must be followed by whitespace, an operator or punctuation.
`$x!=1` is rejected; write `$x != 1`.

## Values

There are four types: `true`/`false`, 64-bit integers like `42`, doubles
like `4.2` and strings like `"text"`. Strings have no escapes and may span
lines. Integer arithmetic wraps around on overflow.

Operators never convert between types. `1 + 1.5` fails at run time;
write `double(1) + 1.5`. The only mixed operation is `+` on two strings,
which concatenates them.

| Cast        | From                                                     |
|-------------|----------------------------------------------------------|
| `bool(x)`   | `"true"` is true, other text false, numbers test nonzero |
| `int(x)`    | leading decimal digits of text, truncated doubles        |
| `double(x)` | leading decimal number of text                           |
| `string(x)` | doubles print with six decimals, `1.500000`              |

## Variables

Every variable is an array. Writing to a variable that does not exist
creates it with one element, so `$a = 1;` and `$a[0] = 1;` are the same.
`alloc $a, 10;` resizes to ten elements keeping the existing prefix; new
elements hold `0`. `free $a;` forgets the variable entirely. Reading an
unknown variable or an index outside the array is a run time error.
An array holds at most 16777216 elements.

## Statements

```text
$v[i] = expr;
alloc $v, size;           # the comma is optional
free $v;
inc $v[i];                # integers only
dec $v[i];
print expr, "text", endl; # no newline unless endl is given
scan $v[i];               # reads one line of text
@label:
goto @label;              # forward or backward
if cond { } elseif cond { } else { }
while cond { }
repeat { } until cond;
```

Conditions must be booleans. `while 1 { }` is a type mismatch.

## Expressions

From loosest to tightest binding:

| Operators                     | Operands                        |
|-------------------------------|---------------------------------|
| `equ` `~`                     | bool                            |
| `or` `\|` `xor` `^`           | bool                            |
| `and` `&`                     | bool                            |
| `==` `!=` `<` `<=` `>` `>=`   | same type, do not chain         |
| `+` `-`                       | int, double; `+` also string    |
| `*` `/` `%`                   | int, double; `%` int only       |
| unary `-` `not` `!`           | int, double; bool               |

## Functions

`?rand(n)` is a random integer from `0` to `n` inclusive.
`?abs`, `?ceil`, `?floor`, `?trunc`, `?round`, `?max` and `?min` keep
integers as integers. `?sqrt`, `?sin`, `?cos`, `?tan`, `?asin`, `?acos`,
`?atan`, `?exp` and `?log` take one number and return a double;
`?pow(x, y)` and `?atan2(y, x)` take two.

## Errors

A script that fails to compile runs nothing. The error names the line
and token. Run time errors name the operator that failed, for example
`division by zero in /`. Either way the exit code is 1.
*/

use core::convert::TryFrom;

// TODO: use a trie structure for more efficient longest-prefix matching
macro_rules! prefix_match {
    (
        match $val:expr => [$name:ident|$rest:ident] {
            $($prefix:literal => $arm:block)*
            _ => $other:block
        }
    ) => {{
        let $name: &[u8];
        let $rest: &[u8];
        match $val {
            $(_ if $val.starts_with($prefix) => {
                $name = &$val[..$prefix.len()];
                $rest = &$val[$prefix.len()..];
                $arm
            })*
            _ => $other
        }
    }};
}

macro_rules! commands {
    ($($name:literal => $mod:ident::$command:ident$(<$lifetime:lifetime>)?,)*) => {
        $(
            #[allow(non_snake_case, non_camel_case_types)]
            pub mod $mod;
        )*
        $(pub use $mod::$command;)*

        /// Commands understood by the stub.
        #[allow(non_camel_case_types)]
        #[derive(Debug, PartialEq, Eq)]
        pub enum Command<'a> {
            $($command($command$(<$lifetime>)?),)*
            Unknown(&'a [u8]),
        }

        impl<'a> Command<'a> {
            pub fn from_packet_body(body: &'a [u8]) -> Result<Command<'a>, CommandParseError<'a>> {
                if body.is_empty() {
                    return Err(CommandParseError::Empty);
                }

                let command = prefix_match! {
                    match body => [name | rest] {
                        $($name => {
                            let cmd = $command::try_from(rest)
                                .map_err(|_| CommandParseError::MalformedCommand(name))?;
                            Command::$command(cmd)
                        })*
                        _ => { Command::Unknown(body) }
                    }
                };

                Ok(command)
            }
        }
    };
}

/// Command parse error
#[derive(Debug, PartialEq, Eq)]
pub enum CommandParseError<'a> {
    Empty,
    /// The command was recognized, but its arguments could not be parsed.
    MalformedCommand(&'a [u8]),
}

commands! {
    b"?" => question_mark::QuestionMark,
    b"c" => _c::c,
    b"g" => _g::g,
    b"G" => _g_upcase::G<'a>,
    b"k" => _k::k,
    b"m" => _m::m,
    b"M" => _m_upcase::M<'a>,
    b"s" => _s::s,
    b"z" => _z::z,
    b"Z" => _z_upcase::Z,
}

pub mod breakpoint;

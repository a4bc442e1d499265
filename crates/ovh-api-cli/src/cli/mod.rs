/*
[INPUT]:  Interactive subcommands
[OUTPUT]: Files written on behalf of the user
[POS]:    CLI layer - interactive helpers
[UPDATE]: When adding interactive subcommands
*/

pub mod init;

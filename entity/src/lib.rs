pub mod dining_group;
pub mod invitation;
pub mod membership;
pub mod user;

/*
 Users can sign up freely but see nothing until they belong to a group.
 Groups are private: you get in by holding an invite code minted by a
 group admin. Invitations expire on their own (7 days) and are kept
 around after they resolve so admins can see the invite history.
 */
